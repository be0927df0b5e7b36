//! Client errors.

use ollamaflow_streaming::StreamError;
use thiserror::Error;

/// Errors surfaced by client operations.
///
/// A non-2xx response is not an error at this layer: materializing calls
/// return an empty/absent result and streaming calls return an immediately
/// empty stream. What lands here is transport failure and a 2xx body that
/// does not decode as the expected aggregate.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP request itself failed (connect, timeout, invalid URL).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A successful response carried a body that does not decode.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A streaming body failed mid-read.
    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
