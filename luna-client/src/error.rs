//! Client errors.

use luna_streaming::StreamError;
use thiserror::Error;

/// Errors from the luna HTTP client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("HTTP error: {status} - {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// The request could not be sent or the connection failed.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The response stream failed mid-flight.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The server response had an unexpected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
