use std::process::{Command, Stdio};
use log::{info, warn};

/// Receives launch signals from the store. Fire-and-forget: the store never
/// learns whether the page actually opened.
pub trait Launcher {
    fn launch(&mut self, url: &str);
}

/// Opens urls with the configured browser command, or the system default
/// handler when none is set.
#[derive(Debug, Clone, Default)]
pub struct BrowserLauncher {
    browser: Option<String>,
}

impl BrowserLauncher {
    pub fn new(browser: Option<String>) -> Self {
        Self { browser }
    }

    /// `None` when no usable browser command is configured.
    fn command_parts<'a>(&'a self, url: &'a str) -> Option<Vec<&'a str>> {
        let mut cmd_parts: Vec<&str> = self.browser.as_deref()?.split_whitespace().collect();
        if cmd_parts.is_empty() {
            return None;
        }
        cmd_parts.push(url);
        Some(cmd_parts)
    }
}

impl Launcher for BrowserLauncher {
    fn launch(&mut self, url: &str) {
        let Some(cmd_parts) = self.command_parts(url) else {
            match open::that(url) {
                Ok(()) => info!("Launcher: opened {} with the default handler", url),
                Err(e) => warn!("Launcher: failed to open {}: {}", url, e),
            }
            return;
        };

        let mut command = Command::new(cmd_parts[0]);
        command.args(&cmd_parts[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        match command.spawn() {
            Ok(_) => info!("Launcher: opened {} with {}", url, cmd_parts[0]),
            Err(e) => warn!("Launcher: failed to open {} with {}: {}", url, cmd_parts[0], e),
        }
    }
}
