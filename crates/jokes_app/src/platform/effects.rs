use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use jokes_core::{ApiError, Effect, EntryId, Msg};
use jokes_engine::{
    GatewayError, GatewayEvent, GatewayHandle, GatewaySettings, RecvError, RequestId,
};

use super::app::LoopEvent;

/// What an outstanding gateway request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Categories,
    Jokes { id: EntryId, generation: u64 },
}

type PendingMap = Arc<Mutex<HashMap<RequestId, Pending>>>;

/// Turns core effects into gateway requests and gateway events back into
/// core messages.
///
/// Every tracked request is answered exactly once: by its gateway event, or
/// with a no-response failure when the gateway worker is gone.
pub struct EffectRunner {
    gateway: GatewayHandle,
    pending: PendingMap,
    loop_tx: mpsc::Sender<LoopEvent>,
    next_request: RequestId,
}

impl EffectRunner {
    pub fn new(
        settings: GatewaySettings,
        loop_tx: mpsc::Sender<LoopEvent>,
    ) -> Result<Self, GatewayError> {
        Ok(Self::with_gateway(GatewayHandle::new(settings)?, loop_tx))
    }

    pub fn with_gateway(gateway: GatewayHandle, loop_tx: mpsc::Sender<LoopEvent>) -> Self {
        let runner = Self {
            gateway,
            pending: Arc::new(Mutex::new(HashMap::new())),
            loop_tx,
            next_request: 1,
        };
        runner.spawn_event_loop();
        runner
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchCategories => {
                    let request_id = self.track(Pending::Categories);
                    engine_info!("FetchCategories request_id={}", request_id);
                    if !self.gateway.list_categories(request_id) {
                        self.fail_undelivered(request_id);
                    }
                }
                Effect::FetchJokes {
                    id,
                    generation,
                    category,
                    amount,
                } => {
                    let request_id = self.track(Pending::Jokes { id, generation });
                    engine_info!(
                        "FetchJokes request_id={} entry={} category={} amount={}",
                        request_id,
                        id,
                        category,
                        amount
                    );
                    if !self.gateway.fetch_jokes(request_id, category, amount) {
                        self.fail_undelivered(request_id);
                    }
                }
                Effect::ShowJokeDetail(_) => {
                    // presentation-only; drawn by the app loop
                }
            }
        }
    }

    /// Stops the gateway worker; anything still outstanding is reported as failed.
    pub fn stop(&self) {
        self.gateway.stop();
    }

    fn track(&mut self, pending: Pending) -> RequestId {
        let request_id = self.next_request;
        self.next_request += 1;
        if let Ok(mut map) = self.pending.lock() {
            map.insert(request_id, pending);
        }
        request_id
    }

    fn fail_undelivered(&self, request_id: RequestId) {
        let issued_for = self
            .pending
            .lock()
            .ok()
            .and_then(|mut map| map.remove(&request_id));
        if let Some(issued_for) = issued_for {
            engine_warn!("Request {} was not delivered to the gateway", request_id);
            let _ = self.loop_tx.send(LoopEvent::Msg(no_response(issued_for)));
        }
    }

    fn spawn_event_loop(&self) {
        let gateway = self.gateway.clone();
        let pending = self.pending.clone();
        let loop_tx = self.loop_tx.clone();
        thread::spawn(move || loop {
            let event = match gateway.recv_timeout(Duration::from_millis(100)) {
                Ok(event) => event,
                Err(RecvError::Timeout) => continue,
                Err(RecvError::Disconnected) => {
                    engine_warn!("Gateway worker disconnected");
                    let orphans: Vec<Pending> = match pending.lock() {
                        Ok(mut map) => map.drain().map(|(_, issued_for)| issued_for).collect(),
                        Err(_) => Vec::new(),
                    };
                    for issued_for in orphans {
                        let _ = loop_tx.send(LoopEvent::Msg(no_response(issued_for)));
                    }
                    break;
                }
            };
            let msg = match pending.lock() {
                Ok(mut map) => event_to_msg(event, &mut map),
                Err(_) => None,
            };
            if let Some(msg) = msg {
                if loop_tx.send(LoopEvent::Msg(msg)).is_err() {
                    break;
                }
            }
        });
    }
}

/// Completion for a request that will never get a response.
fn no_response(issued_for: Pending) -> Msg {
    match issued_for {
        Pending::Categories => Msg::CategoriesLoaded {
            result: Err(ApiError::no_response()),
        },
        Pending::Jokes { id, generation } => Msg::JokesLoaded {
            id,
            generation,
            result: Err(ApiError::no_response()),
        },
    }
}

fn event_to_msg(event: GatewayEvent, pending: &mut HashMap<RequestId, Pending>) -> Option<Msg> {
    let request_id = event.request_id();
    let Some(issued_for) = pending.remove(&request_id) else {
        engine_warn!("Gateway event for unknown request {}", request_id);
        return None;
    };
    match (event, issued_for) {
        (GatewayEvent::CategoriesFetched { result, .. }, Pending::Categories) => {
            Some(Msg::CategoriesLoaded { result })
        }
        (GatewayEvent::JokesFetched { result, .. }, Pending::Jokes { id, generation }) => {
            Some(Msg::JokesLoaded {
                id,
                generation,
                result: result.map(|jokes| jokes.into_iter().map(|joke| joke.joke).collect()),
            })
        }
        (event, issued_for) => {
            engine_debug!(
                "Ignoring gateway event {:?} for request issued as {:?}",
                event,
                issued_for
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use jokes_engine::{Joke, JokeFlags};

    fn joke(text: &str) -> Joke {
        Joke {
            category: "Pun".into(),
            kind: "single".into(),
            joke: text.into(),
            flags: JokeFlags::default(),
            id: 1,
            safe: true,
            lang: "en".into(),
        }
    }

    #[test]
    fn jokes_event_maps_back_to_entry_and_generation() {
        let mut pending = HashMap::from([(7, Pending::Jokes { id: 2, generation: 3 })]);
        let msg = event_to_msg(
            GatewayEvent::JokesFetched {
                request_id: 7,
                result: Ok(vec![joke("a"), joke("b")]),
            },
            &mut pending,
        );
        assert_eq!(
            msg,
            Some(Msg::JokesLoaded {
                id: 2,
                generation: 3,
                result: Ok(vec!["a".into(), "b".into()]),
            })
        );
        assert!(pending.is_empty());
    }

    #[test]
    fn categories_failure_is_forwarded() {
        let mut pending = HashMap::from([(1, Pending::Categories)]);
        let msg = event_to_msg(
            GatewayEvent::CategoriesFetched {
                request_id: 1,
                result: Err(ApiError::no_response()),
            },
            &mut pending,
        );
        assert_eq!(
            msg,
            Some(Msg::CategoriesLoaded {
                result: Err(ApiError::no_response())
            })
        );
    }

    #[test]
    fn unknown_or_mismatched_requests_are_dropped() {
        let mut pending = HashMap::from([(1, Pending::Categories)]);
        let unknown = GatewayEvent::CategoriesFetched {
            request_id: 9,
            result: Ok(Vec::new()),
        };
        assert_eq!(event_to_msg(unknown, &mut pending), None);

        let mismatched = GatewayEvent::JokesFetched {
            request_id: 1,
            result: Ok(Vec::new()),
        };
        assert_eq!(event_to_msg(mismatched, &mut pending), None);
        assert!(pending.is_empty());
    }

    /// A runner whose gateway worker has already exited.
    fn runner_with_dead_gateway() -> (EffectRunner, mpsc::Receiver<LoopEvent>) {
        let gateway = GatewayHandle::new(GatewaySettings::default()).expect("gateway");
        gateway.stop();
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if gateway.recv_timeout(Duration::from_millis(20)) == Err(RecvError::Disconnected) {
                break;
            }
        }
        let (loop_tx, loop_rx) = mpsc::channel();
        (EffectRunner::with_gateway(gateway, loop_tx), loop_rx)
    }

    fn next_msg(loop_rx: &mpsc::Receiver<LoopEvent>) -> Msg {
        match loop_rx.recv_timeout(Duration::from_secs(5)) {
            Ok(LoopEvent::Msg(msg)) => msg,
            other => panic!("expected a message, got {other:?}"),
        }
    }

    #[test]
    fn undeliverable_requests_fail_with_no_response() {
        let (mut runner, loop_rx) = runner_with_dead_gateway();
        runner.enqueue(vec![
            Effect::FetchCategories,
            Effect::FetchJokes {
                id: 3,
                generation: 2,
                category: "Pun".into(),
                amount: 2,
            },
        ]);

        assert_eq!(
            next_msg(&loop_rx),
            Msg::CategoriesLoaded {
                result: Err(ApiError::no_response())
            }
        );
        assert_eq!(
            next_msg(&loop_rx),
            Msg::JokesLoaded {
                id: 3,
                generation: 2,
                result: Err(ApiError::no_response()),
            }
        );
        assert!(runner.pending.lock().unwrap().is_empty());
        assert!(loop_rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn failed_load_unblocks_the_core() {
        use jokes_core::{update, AppState};

        let (mut runner, loop_rx) = runner_with_dead_gateway();
        let (state, effects) = update(AppState::new(), Msg::Mounted);
        runner.enqueue(effects);
        let (state, _) = update(state, next_msg(&loop_rx));
        assert!(!state.view().boot_loading);

        let (_, effects) = update(state, Msg::RefreshRequested);
        assert_eq!(effects, vec![Effect::FetchCategories]);
    }
}
