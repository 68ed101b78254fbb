use std::fmt;

/// Status used when a request never received a response.
pub const NO_RESPONSE_STATUS: u16 = 503;
/// Status used for local failures that have no HTTP status of their own.
pub const CLIENT_FAULT_STATUS: u16 = 500;

/// Uniform failure shape handed to the store, whatever went wrong on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// The server answered with an error status; prefer the message from its body.
    pub fn server(status: u16, body_message: Option<&str>) -> Self {
        match body_message.map(str::trim).filter(|msg| !msg.is_empty()) {
            Some(msg) => Self::new(status, msg),
            None => Self::new(status, format!("Request failed with status {status}.")),
        }
    }

    pub fn no_response() -> Self {
        Self::new(
            NO_RESPONSE_STATUS,
            "No response from server. Please check your network connection.",
        )
    }

    pub fn unexpected_status(status: u16) -> Self {
        Self::new(status, "Unexpected response status")
    }

    pub fn client_fault(description: &str) -> Self {
        let description = description.trim();
        if description.is_empty() {
            Self::new(CLIENT_FAULT_STATUS, "Unexpected error occurred.")
        } else {
            Self::new(CLIENT_FAULT_STATUS, description)
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {})", self.message, self.status)
    }
}

impl std::error::Error for ApiError {}

/// Text stored in an entry's joke list when a fetch for it failed.
pub fn error_marker(message: &str) -> String {
    format!("⚠️ Error: {message}")
}
