//! Aggregate list of category entries and its total transition functions.
//!
//! Every operation addresses entries by [`EntryId`], never by position, and
//! an unknown id leaves the list untouched. Each returns `true` when it
//! changed something so callers can track re-render needs.

use engine_logging::engine_debug;

use crate::entry::{CategoryEntry, EntryId, FetchPhase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregateList {
    entries: Vec<CategoryEntry>,
    boot_loading: bool,
    refreshing: bool,
    generation: u64,
}

impl AggregateList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    pub fn entry(&self, id: EntryId) -> Option<&CategoryEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn boot_loading(&self) -> bool {
        self.boot_loading
    }

    pub fn refreshing(&self) -> bool {
        self.refreshing
    }

    /// Bumped by every [`AggregateList::initialize`]; fetches issued under an
    /// older generation belong to entries that no longer exist.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn set_boot_loading(&mut self, value: bool) {
        self.boot_loading = value;
    }

    pub(crate) fn set_refreshing(&mut self, value: bool) {
        self.refreshing = value;
    }

    /// Replaces the whole list with fresh entries, ids 1..=N in input order.
    pub fn initialize<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries = categories
            .into_iter()
            .zip(1..)
            .map(|(title, id)| CategoryEntry::new(id, title))
            .collect();
        self.generation += 1;
        engine_debug!(
            "initialized {} categories (generation {})",
            self.entries.len(),
            self.generation
        );
    }

    pub fn toggle_expand(&mut self, id: EntryId) -> bool {
        match self.entry_mut(id) {
            Some(entry) => {
                entry.toggle_expanded();
                true
            }
            None => false,
        }
    }

    /// Marks a load-more as in flight. Refused while any fetch is running
    /// for the entry or when it cannot grow.
    pub fn begin_load_more(&mut self, id: EntryId) -> bool {
        self.entry_mut(id)
            .is_some_and(|entry| entry.begin_fetch(FetchPhase::FetchingMore))
    }

    pub(crate) fn begin_initial_fetch(&mut self, id: EntryId) -> bool {
        self.entry_mut(id)
            .is_some_and(|entry| entry.begin_fetch(FetchPhase::FetchingInitial))
    }

    /// Appends jokes without ever exceeding the cap; extras are dropped.
    pub fn append_jokes<I>(&mut self, id: EntryId, jokes: I) -> bool
    where
        I: IntoIterator<Item = String>,
    {
        match self.entry_mut(id) {
            Some(entry) => {
                let stored = entry.append_jokes(jokes);
                engine_debug!("entry {id}: stored {stored} jokes");
                true
            }
            None => false,
        }
    }

    /// Stores an error marker and stops any further growth for the entry.
    pub fn record_fetch_failure(&mut self, id: EntryId, message: &str) -> bool {
        match self.entry_mut(id) {
            Some(entry) => {
                entry.record_failure(message);
                true
            }
            None => false,
        }
    }

    pub fn pin_to_top(&mut self, id: EntryId) -> bool {
        match self.entries.iter().position(|entry| entry.id() == id) {
            Some(0) | None => false,
            Some(index) => {
                let entry = self.entries.remove(index);
                self.entries.insert(0, entry);
                true
            }
        }
    }

    fn entry_mut(&mut self, id: EntryId) -> Option<&mut CategoryEntry> {
        self.entries.iter_mut().find(|entry| entry.id() == id)
    }
}
