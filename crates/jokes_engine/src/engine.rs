use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_error, engine_info, engine_warn};
use jokes_core::ApiError;

use crate::gateway::{GatewaySettings, JokeGateway, ReqwestGateway};
use crate::{GatewayError, GatewayEvent, RequestId};

enum GatewayCommand {
    ListCategories {
        request_id: RequestId,
    },
    FetchJokes {
        request_id: RequestId,
        category: String,
        amount: usize,
    },
    FetchSingleJoke {
        request_id: RequestId,
        category: String,
    },
    Stop,
}

/// Why [`GatewayHandle::recv_timeout`] returned without an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvError {
    /// Nothing completed within the timeout; more may still arrive.
    Timeout,
    /// The worker is gone and no event will ever arrive again.
    Disconnected,
}

/// Runs gateway requests on a background tokio runtime.
///
/// Commands return immediately; each delivered command produces exactly one
/// [`GatewayEvent`] tagged with the caller's [`RequestId`]. Requests run
/// concurrently, so events arrive in completion order. A command that could
/// not be delivered (the worker stopped) returns `false` and produces nothing.
#[derive(Clone)]
pub struct GatewayHandle {
    cmd_tx: mpsc::Sender<GatewayCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<GatewayEvent>>>,
}

impl GatewayHandle {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let gateway = ReqwestGateway::new(settings)?;
        Ok(Self::with_gateway(Arc::new(gateway)))
    }

    pub fn with_gateway(gateway: Arc<dyn JokeGateway>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            match tokio::runtime::Runtime::new() {
                Ok(runtime) => {
                    while let Ok(command) = cmd_rx.recv() {
                        if matches!(command, GatewayCommand::Stop) {
                            break;
                        }
                        let gateway = gateway.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            if let Some(event) = handle_command(gateway.as_ref(), command).await {
                                let _ = event_tx.send(event);
                            }
                        });
                    }
                    engine_info!("Gateway worker stopping");
                    // Cancels requests still in flight.
                    drop(runtime);
                }
                Err(err) => engine_error!("Could not start gateway runtime: {}", err),
            }
            // Commands must be refused before receivers observe the disconnect.
            drop(cmd_rx);
            drop(event_tx);
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    #[must_use = "an undelivered request never produces an event"]
    pub fn list_categories(&self, request_id: RequestId) -> bool {
        self.send(GatewayCommand::ListCategories { request_id })
    }

    #[must_use = "an undelivered request never produces an event"]
    pub fn fetch_jokes(
        &self,
        request_id: RequestId,
        category: impl Into<String>,
        amount: usize,
    ) -> bool {
        self.send(GatewayCommand::FetchJokes {
            request_id,
            category: category.into(),
            amount,
        })
    }

    #[must_use = "an undelivered request never produces an event"]
    pub fn fetch_single_joke(&self, request_id: RequestId, category: impl Into<String>) -> bool {
        self.send(GatewayCommand::FetchSingleJoke {
            request_id,
            category: category.into(),
        })
    }

    /// Asks the worker to exit; outstanding requests are abandoned.
    pub fn stop(&self) {
        let _ = self.cmd_tx.send(GatewayCommand::Stop);
    }

    pub fn try_recv(&self) -> Option<GatewayEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<GatewayEvent, RecvError> {
        let rx = self.event_rx.lock().map_err(|_| RecvError::Disconnected)?;
        rx.recv_timeout(timeout).map_err(|err| match err {
            mpsc::RecvTimeoutError::Timeout => RecvError::Timeout,
            mpsc::RecvTimeoutError::Disconnected => RecvError::Disconnected,
        })
    }

    fn send(&self, command: GatewayCommand) -> bool {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("Gateway worker is gone; request dropped");
            return false;
        }
        true
    }
}

async fn handle_command(
    gateway: &dyn JokeGateway,
    command: GatewayCommand,
) -> Option<GatewayEvent> {
    let event = match command {
        GatewayCommand::ListCategories { request_id } => GatewayEvent::CategoriesFetched {
            request_id,
            result: gateway.list_categories().await.map_err(report),
        },
        GatewayCommand::FetchJokes {
            request_id,
            category,
            amount,
        } => GatewayEvent::JokesFetched {
            request_id,
            result: gateway.fetch_jokes(&category, amount).await.map_err(report),
        },
        GatewayCommand::FetchSingleJoke {
            request_id,
            category,
        } => GatewayEvent::SingleJokeFetched {
            request_id,
            result: gateway.fetch_single_joke(&category).await.map_err(report),
        },
        GatewayCommand::Stop => return None,
    };
    Some(event)
}

fn report(err: GatewayError) -> ApiError {
    engine_warn!("Gateway request failed: {}", err);
    err.normalize()
}
