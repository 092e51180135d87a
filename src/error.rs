//! Error types for Pipedrive API operations.

use thiserror::Error;

/// Errors that can occur during Pipedrive API operations.
#[derive(Debug, Error)]
pub enum PipedriveError {
    /// Configuration is missing or incomplete.
    #[error("Pipedrive configuration required: {0}")]
    ConfigMissing(String),

    /// An operation was invoked with missing or malformed arguments.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// API request failed.
    #[error("Pipedrive API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// I/O error (server sockets).
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

/// Result type alias for Pipedrive operations.
pub type Result<T> = core::result::Result<T, PipedriveError>;
