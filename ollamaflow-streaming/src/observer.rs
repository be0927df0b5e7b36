//! Optional observation hooks for a record stream.

use crate::pump::PumpState;

/// Observer notified of events the consumer never sees.
///
/// Decoded records flow to the consumer; what an observer gets is the rest:
/// lines the decoder skipped and the terminal state the pump reached. All
/// methods default to no-ops, so implementors override only what they need.
pub trait StreamObserver: Send + Sync {
    /// A line failed to decode and was skipped.
    fn on_skipped_line(&self, _line: &str) {}

    /// The pump reached a terminal state.
    fn on_terminal(&self, _state: PumpState) {}
}
