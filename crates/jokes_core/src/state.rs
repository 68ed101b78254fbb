use crate::store::AggregateList;
use crate::view_model::{AggregateView, EntryRowView};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    list: AggregateList,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &AggregateList {
        &self.list
    }

    pub(crate) fn list_mut(&mut self) -> &mut AggregateList {
        &mut self.list
    }

    /// A categories request is outstanding, either the first load or a refresh.
    pub fn categories_pending(&self) -> bool {
        self.list.boot_loading() || self.list.refreshing()
    }

    pub fn view(&self) -> AggregateView {
        let rows = self
            .list
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| EntryRowView::from_entry(index + 1, entry))
            .collect();
        AggregateView {
            boot_loading: self.list.boot_loading(),
            refreshing: self.list.refreshing(),
            rows,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}
