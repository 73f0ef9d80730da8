mod config;
mod error;
mod launcher;
mod matcher;
mod model;
mod state;
mod storage;
mod ui;

use std::io::{self, Write};
use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crate::config::load_config;
use crate::launcher::BrowserLauncher;
use crate::state::{EntryStore, LoadOutcome};
use crate::storage::FileStorage;
use crate::ui::render::Renderer;
use crate::ui::shell::{resolve_target, Shell};

#[derive(Parser, Debug)]
#[command(author, version, about = "Web shortcuts dressed up as virtual machines", long_about = None)]
struct Args {
    /// Config file to use instead of the platform default
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// List all machines
    List,
    /// Add a machine
    New { name: String, url: String },
    /// Open a machine by index or name
    Start { target: String },
    /// Show details of a machine by index or name
    Show { target: String },
    /// Interactive session (default)
    Shell,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let storage = FileStorage::new(config.storage.data_dir());
    log::debug!("Using storage in {:?}", storage.dir());

    let launcher = BrowserLauncher::new(config.general.browser.clone());
    let mut store = EntryStore::load(storage, launcher, config.storage.store_options());
    if let LoadOutcome::Corrupt(reason) = store.load_outcome() {
        eprintln!("warning: saved machines could not be read and were ignored ({})", reason);
    }

    let renderer = Renderer::new();
    let mut stdout = io::stdout().lock();

    match args.command.unwrap_or(Cmd::Shell) {
        Cmd::List => renderer.draw_list(&mut stdout, store.entries(), None)?,
        Cmd::New { name, url } => {
            let (index, entry) = store.create(&name, &url)
                .context("could not add machine")?;
            writeln!(stdout, "Added '{}' as {} ({})", entry.name, index, entry.url)?;
        }
        Cmd::Start { target } => {
            let selection = resolve_target(&mut store, &target)?;
            store.select(selection)?;
            match store.start() {
                Some(entry) => writeln!(stdout, "Started '{}' at {}", entry.name, entry.url)?,
                None => writeln!(stdout, "Nothing to start.")?,
            }
        }
        Cmd::Show { target } => {
            let selection = resolve_target(&mut store, &target)?;
            let entry = store.select(selection)?;
            renderer.draw_details(&mut stdout, entry)?;
        }
        Cmd::Shell => {
            let mut shell = Shell::new(store);
            shell.run(io::stdin().lock(), &mut stdout)?;
        }
    }

    Ok(())
}
