//! Streaming errors.

use thiserror::Error;

/// Errors that can occur while decoding a streamed response body.
///
/// Per-line decode failures are deliberately absent: a malformed line is
/// skipped, never surfaced. Only transport-class failures end up here.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The transport failed while reading the next chunk.
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO error from the underlying byte source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The carried line fragment exceeded the reassembly buffer cap.
    #[error("Line buffer overflow")]
    BufferOverflow,
}

impl StreamError {
    /// Create a transport error from any displayable source error.
    pub fn transport<E: std::fmt::Display>(err: E) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StreamError::BufferOverflow;
        assert_eq!(err.to_string(), "Line buffer overflow");

        let err = StreamError::transport("connection reset");
        assert_eq!(err.to_string(), "Transport error: connection reset");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: StreamError = io.into();
        assert!(matches!(err, StreamError::Io(_)));
    }
}
