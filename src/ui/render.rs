use std::io::{self, Write};
use crate::model::{Entry, Selection, Toolbar};

const RUNNING_DOT: &str = "●";
const STOPPED_DOT: &str = "○";

/// Plain-text view of the entry list, the details pane and the toolbar.
#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn draw<W: Write>(&self, out: &mut W, entries: &[Entry], selected: Selection) -> io::Result<()> {
        self.draw_list(out, entries, selected)?;
        writeln!(out)?;
        self.draw_details(out, selected.and_then(|i| entries.get(i)))?;
        self.draw_toolbar(out, Toolbar::for_selection(selected))
    }

    pub fn draw_list<W: Write>(&self, out: &mut W, entries: &[Entry], selected: Selection) -> io::Result<()> {
        if entries.is_empty() {
            return writeln!(out, "No machines yet. Use `new <name> <url>` to add one.");
        }

        for (i, entry) in entries.iter().enumerate() {
            let marker = if selected == Some(i) { ">" } else { " " };
            let dot = if entry.running { RUNNING_DOT } else { STOPPED_DOT };
            writeln!(out, "{} {:>2}. {} {}", marker, i, dot, entry.name)?;
        }
        Ok(())
    }

    pub fn draw_details<W: Write>(&self, out: &mut W, entry: Option<&Entry>) -> io::Result<()> {
        match entry {
            None => writeln!(out, "Select a machine to see its details."),
            Some(entry) => {
                writeln!(out, "Name:    {}", entry.name)?;
                writeln!(out, "URL:     {}", entry.url)?;
                writeln!(out, "Created: {}", entry.created.format("%Y-%m-%d %H:%M"))?;
                writeln!(out, "State:   {}", if entry.running { "running" } else { "powered off" })
            }
        }
    }

    fn draw_toolbar<W: Write>(&self, out: &mut W, toolbar: Toolbar) -> io::Result<()> {
        let flag = |on: bool| if on { "enabled" } else { "disabled" };
        writeln!(out, "[start: {}] [settings: {}]", flag(toolbar.can_start), flag(toolbar.can_configure))
    }
}
