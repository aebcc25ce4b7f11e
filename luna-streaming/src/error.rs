//! Streaming errors.

use thiserror::Error;

/// Errors that can occur while consuming a response stream.
///
/// Malformed individual frames are NOT errors; they are skipped and logged.
/// Only transport-level failures and cancellation terminate a session.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The underlying byte stream failed.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The stream was cancelled by the caller.
    #[error("Stream cancelled")]
    Cancelled,
}

/// Result type for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;
