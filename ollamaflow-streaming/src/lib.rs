//! # ollamaflow-streaming
//!
//! Chunk-safe decoding of line-delimited JSON response bodies.
//!
//! An HTTP response from a model gateway arrives either as one buffered body
//! or as a sequence of byte chunks cut at arbitrary boundaries. This crate
//! turns such a body into a lazy, forward-only stream of typed records:
//! lines are reassembled across chunk boundaries, malformed lines are
//! skipped without aborting the stream, and a caller-supplied stop predicate
//! can end the stream before the transport does.
//!
//! ## Core Concepts
//!
//! - **[`Chunk`]**: one delivery unit of raw bytes plus a final-delivery flag
//! - **[`LineReassembler`]**: carries incomplete fragments between chunks
//! - **[`LineTransform`]**: per-line preprocessing (bare NDJSON or the
//!   `data: `-prefixed event-stream dialect)
//! - **[`RecordStream`]**: the pump driving reassembly and decoding,
//!   exposed as a `futures::Stream`
//! - **[`DecodeStrategy`]**: materializing decode of a buffered body
//!   (direct array / enveloped object / line-at-a-time)
//!
//! ## Example
//!
//! ```ignore
//! use futures::StreamExt;
//! use ollamaflow_streaming::{LineTransform, RecordStream};
//!
//! let mut stream = RecordStream::<_, ProgressRecord>::new(chunk_source)
//!     .with_transform(LineTransform::Identity)
//!     .with_stop(|record: &ProgressRecord| record.status == "success");
//!
//! while let Some(record) = stream.next().await {
//!     println!("{:?}", record?);
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod chunk;
pub mod decode;
pub mod error;
pub mod line;
pub mod observer;
pub mod pump;
pub mod transform;

// Re-exports
pub use chunk::{Chunk, ChunkStream};
pub use decode::{
    decode_all, decode_line, decode_listing, DecodeStrategy, ENVELOPE_KEYS, MODEL_ENVELOPE_KEYS,
};
pub use error::{StreamError, StreamResult};
pub use line::LineReassembler;
pub use observer::StreamObserver;
pub use pump::{PumpState, RecordStream, StopPredicate};
pub use transform::LineTransform;

// The cancellation primitive accepted by `RecordStream::with_cancellation`.
pub use tokio_util::sync::CancellationToken;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        CancellationToken, Chunk, ChunkStream, DecodeStrategy, LineReassembler, LineTransform,
        PumpState, RecordStream, StopPredicate, StreamError, StreamObserver, StreamResult,
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_prelude_imports() {
        use crate::prelude::*;

        let chunk = Chunk::last("x");
        assert!(chunk.is_final);
        assert!(PumpState::Cancelled.is_terminal());
    }
}
