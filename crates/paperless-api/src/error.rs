//! Error taxonomy for Paperless API calls.

use thiserror::Error;

/// Result alias for Paperless API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by the Paperless API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The requested resource does not exist (404).
    #[error("resource not found: {0}")]
    NotFound(String),

    /// Any other non-success status from the API.
    #[error("Paperless returned {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The response body could not be decoded.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Client construction or base-URL problems.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    /// Whether this error is a 404 from the remote API.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
