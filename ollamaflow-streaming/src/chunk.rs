//! The chunk model: one delivery unit of a streamed response body.

use crate::error::StreamResult;
use bytes::Bytes;
use futures::stream::BoxStream;

/// One delivery unit of raw bytes from a streaming response, plus a flag
/// marking the transport's final delivery.
///
/// Chunks are produced by the transport collaborator and consumed exactly
/// once by the line reassembler. A source that signals completion by ending
/// the stream instead of flagging a final chunk is equivalent: the decoder
/// flushes its carry buffer in both cases.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// Raw chunk bytes.
    pub data: Bytes,
    /// Whether the transport marked this as the final delivery.
    pub is_final: bool,
}

impl Chunk {
    /// Create an intermediate (non-final) chunk.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            is_final: false,
        }
    }

    /// Create a final chunk.
    pub fn last(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            is_final: true,
        }
    }

    /// Whether the chunk carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A boxed stream of chunks, the input boundary of the record pump.
pub type ChunkStream = BoxStream<'static, StreamResult<Chunk>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_constructors() {
        let chunk = Chunk::new("hello");
        assert!(!chunk.is_final);
        assert!(!chunk.is_empty());

        let chunk = Chunk::last(Bytes::new());
        assert!(chunk.is_final);
        assert!(chunk.is_empty());
    }
}
