//! Jokes engine: remote content gateway and request execution.
mod engine;
mod error;
mod gateway;
mod payload;
mod types;

pub use engine::{GatewayHandle, RecvError};
pub use error::GatewayError;
pub use gateway::{GatewaySettings, JokeGateway, ReqwestGateway};
pub use types::{GatewayEvent, Joke, JokeFlags, RequestId};
