use crate::error::error_marker;

/// Stable identity of a category entry, assigned 1-based from fetch order.
pub type EntryId = u64;

/// Maximum number of jokes retained per category in one session.
pub const JOKE_CAP: usize = 6;
/// Largest number of jokes requested by a single load-more.
pub const BURST_LIMIT: usize = 2;
/// Number of jokes requested the first time an empty entry is expanded.
pub const INITIAL_BURST: usize = 2;

/// Which fetch, if any, is in flight for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    FetchingInitial,
    FetchingMore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    id: EntryId,
    title: String,
    jokes: Vec<String>,
    expanded: bool,
    phase: FetchPhase,
    failed: bool,
}

impl CategoryEntry {
    pub(crate) fn new(id: EntryId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            jokes: Vec::new(),
            expanded: false,
            phase: FetchPhase::Idle,
            failed: false,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn jokes(&self) -> &[String] {
        &self.jokes
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase
    }

    pub fn loading_more(&self) -> bool {
        self.phase == FetchPhase::FetchingMore
    }

    pub fn is_fetching(&self) -> bool {
        self.phase != FetchPhase::Idle
    }

    /// Derived from the joke count and the failure latch on every call.
    pub fn can_grow(&self) -> bool {
        !self.failed && self.jokes.len() < JOKE_CAP
    }

    /// True once a fetch failure has been recorded for this entry.
    pub fn is_errored(&self) -> bool {
        self.failed
    }

    /// Jokes still allowed before the cap is reached.
    pub fn headroom(&self) -> usize {
        JOKE_CAP.saturating_sub(self.jokes.len())
    }

    pub(crate) fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Returns false when a fetch is already in flight or the entry cannot grow.
    pub(crate) fn begin_fetch(&mut self, phase: FetchPhase) -> bool {
        if phase == FetchPhase::Idle || self.is_fetching() || !self.can_grow() {
            return false;
        }
        self.phase = phase;
        true
    }

    /// Appends up to the remaining headroom; returns how many were stored.
    pub(crate) fn append_jokes<I>(&mut self, jokes: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let room = self.headroom();
        let before = self.jokes.len();
        self.jokes.extend(jokes.into_iter().take(room));
        self.phase = FetchPhase::Idle;
        self.jokes.len() - before
    }

    pub(crate) fn record_failure(&mut self, message: &str) {
        if self.jokes.len() < JOKE_CAP {
            self.jokes.push(error_marker(message));
        }
        self.failed = true;
        self.phase = FetchPhase::Idle;
    }
}
