use crate::{EntryId, JokeDetail};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchCategories,
    FetchJokes {
        id: EntryId,
        generation: u64,
        category: String,
        amount: usize,
    },
    ShowJokeDetail(JokeDetail),
}
