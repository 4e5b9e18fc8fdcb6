//! Error taxonomy for outbound knowledge-base requests
//!
//! Every failure of an API attempt is classified here so the retry loop can
//! decide whether another attempt is worthwhile. Only the `Display` text of
//! these errors ever crosses the operation boundary.

use thiserror::Error;

/// Failure of a single outbound API attempt
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// A required text input was blank; detected before any network call
    #[error("{0}")]
    InvalidInput(&'static str),

    /// Connect or read deadline exceeded
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Non-2xx HTTP response
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Transport-level failure (connection refused, TLS, DNS, ...)
    #[error("network error: {0}")]
    Transport(String),

    /// Anything else (malformed response body, bad request URL, ...)
    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    /// Whether another attempt may succeed
    ///
    /// Timeouts and HTTP 5xx/408/429 are transient; everything else is
    /// terminal.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Status { status, .. } => *status >= 500 || matches!(status, 408 | 429),
            _ => false,
        }
    }

    /// HTTP status code, when the failure carries one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            Self::Transport(err.to_string())
        } else {
            Self::Unexpected(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Unexpected(format!("failed to parse response: {}", err))
    }
}
