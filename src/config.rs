use serde::Deserialize;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use anyhow::{Context, Result};
use std::fs;
use crate::state::{StoreOptions, DEFAULT_KEY};
use crate::storage::default_data_dir;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct GeneralConfig {
    /// Browser command used to open entries; the url is appended.
    #[serde(default)]
    pub browser: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_key")]
    pub key: String,
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default)]
    pub persist_running: bool,
}

fn default_key() -> String { DEFAULT_KEY.to_string() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_key(),
            dir: None,
            persist_running: false,
        }
    }
}

impl StorageConfig {
    pub fn data_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            key: self.key.clone(),
            persist_running: self.persist_running,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    let proj_dirs = ProjectDirs::from("org", "webvm", "webvm");
    if let Some(dirs) = &proj_dirs {
        dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}

pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);

    if !config_path.exists() {
        log::debug!("No config at {:?}, using defaults", config_path);
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("reading {}", config_path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("parsing {}", config_path.display()))?;
    Ok(config)
}
