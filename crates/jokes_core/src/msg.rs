use crate::{ApiError, EntryId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Screen mounted; load the category list for the first time.
    Mounted,
    /// User pulled to refresh; reload categories and reset every entry.
    RefreshRequested,
    /// Gateway answered the category list request.
    CategoriesLoaded {
        result: Result<Vec<String>, ApiError>,
    },
    /// User tapped a category header.
    ExpandToggled { id: EntryId },
    /// User tapped "load more" under an expanded category.
    LoadMoreRequested { id: EntryId },
    /// User asked to move a category to the top of the list.
    PinToTop { id: EntryId },
    /// User picked a joke to read in the detail view.
    JokeSelected { id: EntryId, text: String },
    /// Gateway answered a joke request issued under `generation`.
    JokesLoaded {
        id: EntryId,
        generation: u64,
        result: Result<Vec<String>, ApiError>,
    },
    NoOp,
}
