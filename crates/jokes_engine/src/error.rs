use jokes_core::ApiError;
use thiserror::Error;

/// Everything that can go wrong talking to the content API.
///
/// The variants only matter for logging; callers get the uniform
/// [`ApiError`] through [`GatewayError::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request never got a response (refused, timed out, dropped).
    #[error("no response from server: {0}")]
    Transport(String),
    /// The server answered with a 4xx/5xx status.
    #[error("server returned status {status}")]
    Server {
        status: u16,
        message: Option<String>,
    },
    /// A 2xx/3xx status other than 200 or 201.
    #[error("unexpected response status {0}")]
    UnexpectedStatus(u16),
    /// Failure on our side: bad URL, undecodable payload, and the like.
    #[error("request failed locally: {0}")]
    ClientFault(String),
}

impl GatewayError {
    pub fn normalize(&self) -> ApiError {
        match self {
            GatewayError::Transport(_) => ApiError::no_response(),
            GatewayError::Server { status, message } => {
                ApiError::server(*status, message.as_deref())
            }
            GatewayError::UnexpectedStatus(status) => ApiError::unexpected_status(*status),
            GatewayError::ClientFault(description) => ApiError::client_fault(description),
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        err.normalize()
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
            GatewayError::Transport(err.to_string())
        } else {
            GatewayError::ClientFault(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_follows_failure_source() {
        assert_eq!(
            GatewayError::Transport("refused".into()).normalize(),
            ApiError::new(
                503,
                "No response from server. Please check your network connection."
            )
        );
        assert_eq!(
            GatewayError::Server {
                status: 400,
                message: Some("No matching joke found".into())
            }
            .normalize(),
            ApiError::new(400, "No matching joke found")
        );
        assert_eq!(
            GatewayError::Server {
                status: 502,
                message: None
            }
            .normalize(),
            ApiError::new(502, "Request failed with status 502.")
        );
        assert_eq!(
            GatewayError::UnexpectedStatus(204).normalize(),
            ApiError::new(204, "Unexpected response status")
        );
        assert_eq!(
            GatewayError::ClientFault("bad payload".into()).normalize(),
            ApiError::new(500, "bad payload")
        );
    }
}
