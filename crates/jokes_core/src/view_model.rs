use crate::{CategoryEntry, EntryId, FetchPhase};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregateView {
    pub boot_loading: bool,
    pub refreshing: bool,
    pub rows: Vec<EntryRowView>,
}

impl AggregateView {
    /// Maps a 1-based display position to the entry shown there.
    pub fn id_at(&self, position: usize) -> Option<EntryId> {
        self.rows
            .iter()
            .find(|row| row.position == position)
            .map(|row| row.id)
    }

    pub fn row(&self, id: EntryId) -> Option<&EntryRowView> {
        self.rows.iter().find(|row| row.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRowView {
    pub id: EntryId,
    pub position: usize,
    pub title: String,
    pub expanded: bool,
    pub is_on_top: bool,
    pub jokes: Vec<String>,
    pub loading_more: bool,
    pub fetching_initial: bool,
    pub can_grow: bool,
    pub errored: bool,
}

impl EntryRowView {
    pub(crate) fn from_entry(position: usize, entry: &CategoryEntry) -> Self {
        Self {
            id: entry.id(),
            position,
            title: entry.title().to_string(),
            expanded: entry.expanded(),
            is_on_top: position == 1,
            jokes: entry.jokes().to_vec(),
            loading_more: entry.loading_more(),
            fetching_initial: entry.phase() == FetchPhase::FetchingInitial,
            can_grow: entry.can_grow(),
            errored: entry.is_errored(),
        }
    }
}

/// Content of the joke detail card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeDetail {
    pub category: String,
    pub emoji: &'static str,
    pub text: String,
}

impl JokeDetail {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        let category = category.into();
        let text = text.into();
        Self {
            emoji: category_emoji(&category),
            text: if text.is_empty() {
                "Loading...".to_string()
            } else {
                text
            },
            category,
        }
    }
}

pub fn category_emoji(category: &str) -> &'static str {
    match category {
        "Programming" => "💻",
        "Misc" => "🎭",
        "Dark" => "🌚",
        "Pun" => "🥁",
        "Spooky" => "👻",
        "Christmas" => "🎄",
        _ => "😂",
    }
}
