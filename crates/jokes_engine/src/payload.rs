//! Decoding of JokeAPI response bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::{GatewayError, Joke};

/// Fields every JokeAPI body may carry, success or not.
#[derive(Debug, Default, Deserialize)]
struct Envelope {
    #[serde(default)]
    error: bool,
    message: Option<String>,
    #[serde(rename = "additionalInfo")]
    additional_info: Option<String>,
}

impl Envelope {
    fn into_fault(self) -> GatewayError {
        let description = match (self.message, self.additional_info) {
            (Some(message), Some(info)) => format!("{message}: {info}"),
            (Some(message), None) => message,
            (None, Some(info)) => info,
            (None, None) => String::new(),
        };
        GatewayError::ClientFault(description)
    }
}

fn parse(body: &str, what: &str) -> Result<Value, GatewayError> {
    serde_json::from_str(body)
        .map_err(|err| GatewayError::ClientFault(format!("invalid {what} payload: {err}")))
}

fn check_envelope(value: &Value) -> Result<(), GatewayError> {
    let envelope = Envelope::deserialize(value).unwrap_or_default();
    if envelope.error {
        return Err(envelope.into_fault());
    }
    Ok(())
}

pub(crate) fn decode_categories(body: &str) -> Result<Vec<String>, GatewayError> {
    let value = parse(body, "categories")?;
    check_envelope(&value)?;
    let categories = value
        .get("categories")
        .ok_or_else(|| GatewayError::ClientFault("payload carries no categories".into()))?;
    Vec::<String>::deserialize(categories)
        .map_err(|err| GatewayError::ClientFault(format!("invalid categories payload: {err}")))
}

/// Accepts both the `{"jokes": [...]}` shape and the bare joke object the
/// API returns when exactly one joke was requested.
pub(crate) fn decode_jokes(body: &str) -> Result<Vec<Joke>, GatewayError> {
    let value = parse(body, "jokes")?;
    check_envelope(&value)?;
    let decoded = if let Some(jokes) = value.get("jokes") {
        Vec::<Joke>::deserialize(jokes)
    } else if value.get("joke").is_some() {
        Joke::deserialize(&value).map(|joke| vec![joke])
    } else {
        return Err(GatewayError::ClientFault("payload carries no jokes".into()));
    };
    decoded.map_err(|err| GatewayError::ClientFault(format!("invalid jokes payload: {err}")))
}

/// Best-effort `message` from an error body; `None` when absent or not JSON.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}
