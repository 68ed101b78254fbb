//! Jokes core: per-category aggregation store and the pure fetch orchestrator.
mod effect;
mod entry;
mod error;
mod msg;
mod state;
mod store;
mod update;
mod view_model;

pub use effect::Effect;
pub use entry::{CategoryEntry, EntryId, FetchPhase, BURST_LIMIT, INITIAL_BURST, JOKE_CAP};
pub use error::{error_marker, ApiError};
pub use msg::Msg;
pub use state::AppState;
pub use store::AggregateList;
pub use update::{load_more_amount, update};
pub use view_model::{category_emoji, AggregateView, EntryRowView, JokeDetail};
