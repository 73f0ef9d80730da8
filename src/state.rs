use crate::error::{Result, StoreError};
use crate::launcher::Launcher;
use crate::matcher::FuzzyMatcher;
use crate::model::{Entry, Selection, Toolbar};
use crate::storage::Storage;
use log::{debug, info, warn};

pub const DEFAULT_KEY: &str = "vb_vms";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Storage slot holding the serialized entry list.
    pub key: String,
    /// Write `running` through to storage. Off by default, so every load
    /// starts with all entries stopped.
    pub persist_running: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_KEY.to_string(),
            persist_running: false,
        }
    }
}

/// What construction found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Empty,
    Loaded(usize),
    Corrupt(String),
}

pub struct EntryStore<S: Storage, L: Launcher> {
    storage: S,
    launcher: L,
    options: StoreOptions,
    entries: Vec<Entry>,
    selected: Selection,
    load_outcome: LoadOutcome,
    matcher: FuzzyMatcher,
}

impl<S: Storage, L: Launcher> EntryStore<S, L> {
    /// Never fails: unreadable or malformed data yields an empty list, with the
    /// reason kept in [`LoadOutcome::Corrupt`].
    pub fn load(storage: S, launcher: L, options: StoreOptions) -> Self {
        let (entries, load_outcome) = match storage.get(&options.key) {
            Ok(None) => (Vec::new(), LoadOutcome::Empty),
            Ok(Some(raw)) => match Self::deserialize(&raw) {
                Ok(mut entries) => {
                    if !options.persist_running {
                        entries.iter_mut().for_each(|e| e.running = false);
                    }
                    let n = entries.len();
                    (entries, LoadOutcome::Loaded(n))
                }
                Err(e) => {
                    warn!("EntryStore: discarding persisted entries in '{}': {}", options.key, e);
                    (Vec::new(), LoadOutcome::Corrupt(e.to_string()))
                }
            },
            Err(e) => {
                warn!("EntryStore: could not read '{}': {}", options.key, e);
                (Vec::new(), LoadOutcome::Corrupt(e.to_string()))
            }
        };

        info!("EntryStore: loaded {} entries ({:?})", entries.len(), load_outcome);

        Self {
            storage,
            launcher,
            options,
            entries,
            selected: None,
            load_outcome,
            matcher: FuzzyMatcher::new(),
        }
    }

    pub fn deserialize(raw: &str) -> Result<Vec<Entry>> {
        let entries: Vec<Entry> = serde_json::from_str(raw)?;
        if let Some(i) = entries.iter().position(|e| e.name.trim().is_empty() || e.url.trim().is_empty()) {
            return Err(StoreError::Corrupt(format!("entry {} has an empty name or url", i)));
        }
        Ok(entries)
    }

    pub fn serialize(&self) -> Result<String> {
        if self.options.persist_running {
            return Ok(serde_json::to_string(&self.entries)?);
        }
        let stopped: Vec<Entry> = self.entries.iter()
            .map(|e| Entry { running: false, ..e.clone() })
            .collect();
        Ok(serde_json::to_string(&stopped)?)
    }

    pub fn persist(&mut self) -> Result<()> {
        let raw = self.serialize()?;
        self.storage.set(&self.options.key, &raw)
            .map_err(|e| StoreError::Storage(Box::new(e)))?;
        debug!("EntryStore: persisted {} entries", self.entries.len());
        Ok(())
    }

    /// Transient: selection is never written to storage.
    pub fn select(&mut self, index: Selection) -> Result<Option<&Entry>> {
        if let Some(i) = index {
            if i >= self.entries.len() {
                return Err(StoreError::IndexOutOfRange { index: i, len: self.entries.len() });
            }
        }
        self.selected = index;
        Ok(self.selected_entry())
    }

    /// Appends, persists, then selects the new entry. On a failed write the
    /// append is undone and the previous selection kept.
    pub fn create(&mut self, name: &str, url: &str) -> Result<(usize, &Entry)> {
        let entry = Entry::new(name, url)?;
        self.entries.push(entry);

        if let Err(e) = self.persist() {
            self.entries.pop();
            return Err(e);
        }

        let index = self.entries.len() - 1;
        self.selected = Some(index);
        info!("EntryStore: created '{}' at {}", self.entries[index].name, index);
        Ok((index, &self.entries[index]))
    }

    /// Marks the selected entry running and hands its url to the launcher.
    /// Does nothing when no entry is selected.
    pub fn start(&mut self) -> Option<&Entry> {
        let index = self.selected?;
        let entry = self.entries.get_mut(index)?;
        entry.running = true;
        self.launcher.launch(&entry.url);
        info!("EntryStore: started '{}'", entry.name);

        if self.options.persist_running {
            // The launch already happened; a failed write only loses the flag.
            if let Err(e) = self.persist() {
                warn!("EntryStore: could not persist running flag: {}", e);
            }
        }
        self.entries.get(index)
    }

    pub fn find(&mut self, query: &str) -> Option<usize> {
        self.matcher.best_match(query, &self.entries)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selected(&self) -> Selection {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    pub fn toolbar(&self) -> Toolbar {
        Toolbar::for_selection(self.selected)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    #[cfg(test)]
    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
