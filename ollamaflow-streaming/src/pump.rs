//! The record pump: a lazy stream of typed records over a chunk source.

use crate::chunk::Chunk;
use crate::decode::decode_line;
use crate::error::StreamResult;
use crate::line::LineReassembler;
use crate::observer::StreamObserver;
use crate::transform::LineTransform;
use futures::Stream;
use pin_project_lite::pin_project;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio_util::sync::CancellationToken;

/// Caller-supplied decision whether the stream should end after a record.
///
/// Evaluated once per decoded record, after that record has been queued for
/// the consumer. Matching is whatever the closure says it is: literal,
/// case-sensitive comparison unless the caller folds case itself.
pub type StopPredicate<T> = Box<dyn Fn(&T) -> bool + Send>;

/// Lifecycle of a record stream. Transitions are one-directional; exactly
/// one terminal state is reached and the stream is single-use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    /// Pulling chunks and decoding records.
    Active,
    /// The stop predicate matched; no further chunks were requested.
    StoppedByPredicate,
    /// The transport delivered its final chunk (or closed the body).
    StoppedByFinalChunk,
    /// The cancellation signal fired; stopped without error.
    Cancelled,
    /// A transport-class failure ended the stream.
    Failed,
}

impl PumpState {
    /// Whether this state ends the stream.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Active)
    }
}

pin_project! {
    /// Lazily decodes a chunk source into typed records.
    ///
    /// The stream is forward-only and single-consumer: records are yielded
    /// in strict arrival order of the underlying bytes, malformed lines are
    /// skipped, and the stream ends on the first of stop-predicate match,
    /// final chunk, cancellation, or transport failure. Consumers observe
    /// only decoded records, then either a clean end or exactly one
    /// transport error.
    ///
    /// Dropping the stream drops the inner chunk source, releasing the
    /// transport on every exit path.
    pub struct RecordStream<S, T> {
        #[pin]
        inner: S,
        lines: LineReassembler,
        transform: LineTransform,
        stop: Option<StopPredicate<T>>,
        cancel: Option<CancellationToken>,
        observer: Option<Arc<dyn StreamObserver>>,
        state: PumpState,
        pending: VecDeque<T>,
    }
}

impl<S, T> RecordStream<S, T>
where
    S: Stream<Item = StreamResult<Chunk>>,
    T: DeserializeOwned,
{
    /// Create a pump over a chunk source with identity preprocessing and no
    /// stop predicate.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            lines: LineReassembler::new(),
            transform: LineTransform::Identity,
            stop: None,
            cancel: None,
            observer: None,
            state: PumpState::Active,
            pending: VecDeque::new(),
        }
    }

    /// Set the per-line transform applied before decoding.
    #[must_use]
    pub fn with_transform(mut self, transform: LineTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the stop predicate.
    #[must_use]
    pub fn with_stop<F>(mut self, stop: F) -> Self
    where
        F: Fn(&T) -> bool + Send + 'static,
    {
        self.stop = Some(Box::new(stop));
        self
    }

    /// Attach a cooperative cancellation token.
    ///
    /// The token is checked before each chunk request. Cancellation discards
    /// buffered undecoded bytes and ends the stream without an error.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Attach an observer for skipped lines and the terminal state.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn StreamObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Current pump state.
    pub fn state(&self) -> PumpState {
        self.state
    }
}

fn enter_terminal(
    state: &mut PumpState,
    next: PumpState,
    observer: &Option<Arc<dyn StreamObserver>>,
) {
    *state = next;
    if let Some(observer) = observer {
        observer.on_terminal(next);
    }
}

/// Decode one reassembled line into the pending queue.
///
/// Returns `true` when the stop predicate matched on the decoded record.
fn ingest_line<T: DeserializeOwned>(
    line: &str,
    transform: &LineTransform,
    stop: &Option<StopPredicate<T>>,
    observer: &Option<Arc<dyn StreamObserver>>,
    pending: &mut VecDeque<T>,
) -> bool {
    let payload = transform.apply(line);
    match decode_line::<T>(payload) {
        Some(record) => {
            let stop_hit = stop.as_ref().is_some_and(|predicate| predicate(&record));
            pending.push_back(record);
            stop_hit
        }
        None => {
            if let Some(observer) = observer {
                observer.on_skipped_line(payload);
            }
            false
        }
    }
}

impl<S, T> Stream for RecordStream<S, T>
where
    S: Stream<Item = StreamResult<Chunk>>,
    T: DeserializeOwned,
{
    type Item = StreamResult<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            // Records decoded but not yet pulled are yielded first, in order.
            if let Some(record) = this.pending.pop_front() {
                return Poll::Ready(Some(Ok(record)));
            }

            if this.state.is_terminal() {
                return Poll::Ready(None);
            }

            // Cancellation outranks decoding: checked before every chunk
            // request, manifests as an orderly end of the sequence.
            if let Some(token) = this.cancel.as_ref() {
                if token.is_cancelled() {
                    this.lines.clear();
                    enter_terminal(this.state, PumpState::Cancelled, this.observer);
                    return Poll::Ready(None);
                }
            }

            match this.inner.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    let lines = match this.lines.feed(&chunk.data) {
                        Ok(lines) => lines,
                        Err(error) => {
                            enter_terminal(this.state, PumpState::Failed, this.observer);
                            return Poll::Ready(Some(Err(error)));
                        }
                    };

                    for line in &lines {
                        if ingest_line(line, this.transform, this.stop, this.observer, this.pending)
                        {
                            // Lines after the match and the carried fragment
                            // are dropped; the source is never polled again.
                            this.lines.clear();
                            enter_terminal(this.state, PumpState::StoppedByPredicate, this.observer);
                            break;
                        }
                    }

                    if chunk.is_final && !this.state.is_terminal() {
                        if let Some(fragment) = this.lines.finish() {
                            if ingest_line(
                                &fragment,
                                this.transform,
                                this.stop,
                                this.observer,
                                this.pending,
                            ) {
                                enter_terminal(
                                    this.state,
                                    PumpState::StoppedByPredicate,
                                    this.observer,
                                );
                            }
                        }
                        if !this.state.is_terminal() {
                            enter_terminal(
                                this.state,
                                PumpState::StoppedByFinalChunk,
                                this.observer,
                            );
                        }
                    }
                }
                Poll::Ready(Some(Err(error))) => {
                    enter_terminal(this.state, PumpState::Failed, this.observer);
                    return Poll::Ready(Some(Err(error)));
                }
                Poll::Ready(None) => {
                    // End of body without an explicit final flag: same flush.
                    if let Some(fragment) = this.lines.finish() {
                        ingest_line(&fragment, this.transform, this.stop, this.observer, this.pending);
                    }
                    enter_terminal(this.state, PumpState::StoppedByFinalChunk, this.observer);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
