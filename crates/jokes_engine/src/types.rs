use jokes_core::ApiError;
use serde::Deserialize;

/// Caller-chosen tag echoed back on the matching [`GatewayEvent`].
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct JokeFlags {
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default)]
    pub religious: bool,
    #[serde(default)]
    pub political: bool,
    #[serde(default)]
    pub racist: bool,
    #[serde(default)]
    pub sexist: bool,
    #[serde(default)]
    pub explicit: bool,
}

/// One joke as served by the content API. Only `joke` is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Joke {
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub joke: String,
    #[serde(default)]
    pub flags: JokeFlags,
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub safe: bool,
    #[serde(default)]
    pub lang: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEvent {
    CategoriesFetched {
        request_id: RequestId,
        result: Result<Vec<String>, ApiError>,
    },
    JokesFetched {
        request_id: RequestId,
        result: Result<Vec<Joke>, ApiError>,
    },
    SingleJokeFetched {
        request_id: RequestId,
        result: Result<Joke, ApiError>,
    },
}

impl GatewayEvent {
    pub fn request_id(&self) -> RequestId {
        match self {
            GatewayEvent::CategoriesFetched { request_id, .. }
            | GatewayEvent::JokesFetched { request_id, .. }
            | GatewayEvent::SingleJokeFetched { request_id, .. } => *request_id,
        }
    }
}
