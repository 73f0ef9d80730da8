use std::io::{BufRead, Write};
use anyhow::{bail, Result};
use log::debug;
use crate::error::StoreError;
use crate::launcher::Launcher;
use crate::model::Selection;
use crate::state::EntryStore;
use crate::storage::Storage;
use crate::ui::render::Renderer;

const HELP: &str = "\
commands:
  list                 show all machines
  new <name...> <url>  add a machine (the last word is the url)
  select <i|name|none> change the selection (numbers past the end
                       are matched as names)
  start                open the selected machine
  show                 details of the selected machine
  help                 this text
  quit                 leave the session";

/// `"none"` clears the selection, an in-range number is taken as an index,
/// anything else is matched fuzzily against entry names. A number that
/// matches no name is passed through so selection reports it out of range.
pub fn resolve_target<S: Storage, L: Launcher>(store: &mut EntryStore<S, L>, target: &str) -> Result<Selection> {
    let target = target.trim();
    if target.eq_ignore_ascii_case("none") {
        return Ok(None);
    }
    let index = target.parse::<usize>().ok();
    if let Some(i) = index.filter(|&i| i < store.len()) {
        return Ok(Some(i));
    }
    match (store.find(target), index) {
        (Some(found), _) => Ok(Some(found)),
        (None, Some(i)) => Ok(Some(i)),
        (None, None) => bail!("no machine matches '{}'", target),
    }
}

/// Line-driven session. Each command runs to completion before the next
/// line is read.
pub struct Shell<S: Storage, L: Launcher> {
    pub store: EntryStore<S, L>,
    renderer: Renderer,
    pub should_exit: bool,
}

impl<S: Storage, L: Launcher> Shell<S, L> {
    pub fn new(store: EntryStore<S, L>) -> Self {
        Self {
            store,
            renderer: Renderer::new(),
            should_exit: false,
        }
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        self.redraw(out)?;
        for line in input.lines() {
            let line = line?;
            self.handle_line(&line, out)?;
            if self.should_exit {
                break;
            }
        }
        Ok(())
    }

    pub fn handle_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<()> {
        let line = line.trim();
        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        debug!("Shell: command='{}' args='{}'", command, rest);

        match command {
            "" => {}
            "quit" | "exit" => self.should_exit = true,
            "help" => writeln!(out, "{}", HELP)?,
            "list" => self.redraw(out)?,
            "show" => self.renderer.draw_details(out, self.store.selected_entry())?,
            "new" => {
                let (name, url) = rest.trim().rsplit_once(char::is_whitespace).unwrap_or(("", rest));
                match self.store.create(name, url).map(|_| ()) {
                    Ok(()) => self.redraw(out)?,
                    Err(e @ StoreError::Validation { .. }) => {
                        writeln!(out, "Please enter both a name and a url ({}).", e)?;
                    }
                    Err(e) => writeln!(out, "error: {}", e)?,
                }
            }
            "select" => {
                let selected = resolve_target(&mut self.store, rest)
                    .and_then(|target| Ok(self.store.select(target).map(|_| ())?));
                match selected {
                    Ok(()) => self.redraw(out)?,
                    Err(e) => writeln!(out, "error: {}", e)?,
                }
            }
            "start" => {
                if !self.store.toolbar().can_start {
                    writeln!(out, "Nothing selected.")?;
                } else if self.store.start().is_some() {
                    self.redraw(out)?;
                }
            }
            other => writeln!(out, "unknown command '{}', try `help`", other)?,
        }
        Ok(())
    }

    fn redraw<W: Write>(&self, out: &mut W) -> Result<()> {
        self.renderer.draw(out, self.store.entries(), self.store.selected())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StoreOptions;
    use crate::storage::MemoryStorage;

    #[derive(Default)]
    struct RecordingLauncher {
        launched: Vec<String>,
    }

    impl Launcher for RecordingLauncher {
        fn launch(&mut self, url: &str) {
            self.launched.push(url.to_string());
        }
    }

    fn shell() -> Shell<MemoryStorage, RecordingLauncher> {
        Shell::new(EntryStore::load(MemoryStorage::new(), RecordingLauncher::default(), StoreOptions::default()))
    }

    fn run(shell: &mut Shell<MemoryStorage, RecordingLauncher>, script: &str) -> String {
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn new_then_start_launches() {
        let mut shell = shell();
        run(&mut shell, "new Home Lab lab.local\nstart\n");

        assert_eq!(shell.store.entries()[0].name, "Home Lab");
        assert_eq!(shell.store.launcher().launched, vec!["https://lab.local".to_string()]);
    }

    #[test]
    fn new_with_missing_url_reports_and_continues() {
        let mut shell = shell();
        let text = run(&mut shell, "new Lonely\nnew A a.com\n");
        assert!(text.contains("Please enter both a name and a url"));
        assert_eq!(shell.store.len(), 1);
    }

    #[test]
    fn start_with_nothing_selected() {
        let mut shell = shell();
        let text = run(&mut shell, "new A a.com\nselect none\nstart\n");
        assert!(text.contains("Nothing selected."));
        assert!(shell.store.launcher().launched.is_empty());
    }

    #[test]
    fn select_by_index_and_name() {
        let mut shell = shell();
        run(&mut shell, "new Grafana g.local\nnew Proxmox p.local\nselect 0\n");
        assert_eq!(shell.store.selected(), Some(0));
        run(&mut shell, "select prox\n");
        assert_eq!(shell.store.selected(), Some(1));
    }

    #[test]
    fn numeric_name_past_the_end_is_matched_by_name() {
        let mut shell = shell();
        run(&mut shell, "new Grafana g.local\nnew 2024 archive.local\nselect 0\nselect 2024\n");
        assert_eq!(shell.store.selected(), Some(1));
    }

    #[test]
    fn select_out_of_range_keeps_selection() {
        let mut shell = shell();
        let text = run(&mut shell, "new A a.com\nselect 9\n");
        assert!(text.contains("out of range"));
        assert_eq!(shell.store.selected(), Some(0));
    }

    #[test]
    fn quit_stops_reading() {
        let mut shell = shell();
        run(&mut shell, "quit\nnew A a.com\n");
        assert!(shell.should_exit);
        assert!(shell.store.is_empty());
    }

    #[test]
    fn unknown_command_is_reported() {
        let mut shell = shell();
        let text = run(&mut shell, "reboot\n");
        assert!(text.contains("unknown command 'reboot'"));
    }
}
