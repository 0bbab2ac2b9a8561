//! Client error types.

use thiserror::Error;

/// Failure of a call against the issue REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or undecodable response
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),

    /// The session token is missing, expired or invalid
    #[error("unauthorized, please log in again")]
    Unauthorized,

    #[error("permission denied: {0}")]
    Forbidden(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// The backend rejected the payload
    #[error("rejected: {0}")]
    Validation(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// No token is configured for an operation that requires one
    #[error("you must be logged in")]
    NotLoggedIn,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading a local attachment failed
    #[error("attachment error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Whether the error invalidates the whole session rather than one operation.
    pub fn is_session_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::NotLoggedIn)
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
