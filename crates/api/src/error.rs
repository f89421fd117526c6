use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by [`crate::StackwatchClient`].
///
/// The dashboard never propagates these further than its log panel; the
/// variants exist so callers can pick the right message for each case.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The base URL could not be used to build requests.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    /// Transport-level failure (connection refused, reset, TLS, ...).
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    /// The response body was not the JSON we expected.
    #[error("invalid response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// HTTP 429 from the backend's rate limiter.
    #[error("Too many requests")]
    RateLimited,
    /// Any other non-success status with the server-provided message.
    #[error("{message}")]
    Server { status: u16, message: String },
}

impl ClientError {
    pub(crate) fn server(status: StatusCode, message: Option<String>) -> Self {
        ClientError::Server {
            status: status.as_u16(),
            message: message.unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
        }
    }

    /// HTTP status carried by the error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::RateLimited => Some(StatusCode::TOO_MANY_REQUESTS.as_u16()),
            ClientError::Server { status, .. } => Some(*status),
            ClientError::Network(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}
