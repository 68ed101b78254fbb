use engine_logging::{engine_debug, engine_warn};

use crate::{
    AppState, CategoryEntry, Effect, EntryId, JokeDetail, Msg, BURST_LIMIT, INITIAL_BURST,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted | Msg::RefreshRequested => {
            if state.categories_pending() {
                engine_debug!("categories already loading; ignoring {:?}", msg);
                return (state, Vec::new());
            }
            let list = state.list_mut();
            if msg == Msg::Mounted {
                list.set_boot_loading(true);
            } else {
                list.set_refreshing(true);
            }
            state.mark_dirty();
            vec![Effect::FetchCategories]
        }
        Msg::CategoriesLoaded { result } => {
            let list = state.list_mut();
            match result {
                Ok(categories) => list.initialize(categories),
                // The previous list stays on screen.
                Err(err) => engine_warn!("Fetching categories failed: {}", err),
            }
            list.set_boot_loading(false);
            list.set_refreshing(false);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ExpandToggled { id } => {
            let list = state.list_mut();
            if !list.toggle_expand(id) {
                return (state, Vec::new());
            }
            state.mark_dirty();

            let list = state.list_mut();
            let needs_initial = list
                .entry(id)
                .is_some_and(|entry| entry.expanded() && entry.jokes().is_empty());
            if needs_initial && list.begin_initial_fetch(id) {
                fetch_effect(&state, id, INITIAL_BURST).into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::LoadMoreRequested { id } => {
            let Some(amount) = state.list().entry(id).and_then(admissible_burst) else {
                engine_debug!("load more rejected for entry {}", id);
                return (state, Vec::new());
            };
            if !state.list_mut().begin_load_more(id) {
                return (state, Vec::new());
            }
            state.mark_dirty();
            fetch_effect(&state, id, amount).into_iter().collect()
        }
        Msg::PinToTop { id } => {
            if state.list_mut().pin_to_top(id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::JokeSelected { id, text } => match state.list().entry(id) {
            Some(entry) => vec![Effect::ShowJokeDetail(JokeDetail::new(entry.title(), text))],
            None => Vec::new(),
        },
        Msg::JokesLoaded {
            id,
            generation,
            result,
        } => {
            let list = state.list_mut();
            if generation != list.generation() {
                engine_debug!(
                    "dropping stale jokes for entry {} (generation {} != {})",
                    id,
                    generation,
                    list.generation()
                );
                return (state, Vec::new());
            }
            let changed = match result {
                Ok(jokes) => list.append_jokes(id, jokes),
                Err(err) => {
                    engine_warn!("Fetching jokes for entry {} failed: {}", id, err);
                    list.record_fetch_failure(id, &err.message)
                }
            };
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Size of the next load-more burst: the remaining headroom, at most [`BURST_LIMIT`].
pub fn load_more_amount(entry: &CategoryEntry) -> usize {
    entry.headroom().min(BURST_LIMIT)
}

/// A load-more is only admitted for an idle entry that can still grow.
fn admissible_burst(entry: &CategoryEntry) -> Option<usize> {
    (entry.can_grow() && !entry.is_fetching()).then(|| load_more_amount(entry))
}

fn fetch_effect(state: &AppState, id: EntryId, amount: usize) -> Option<Effect> {
    let list = state.list();
    list.entry(id).map(|entry| Effect::FetchJokes {
        id,
        generation: list.generation(),
        category: entry.title().to_string(),
        amount,
    })
}
