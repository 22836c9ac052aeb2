//! Item processing span helpers.
//!
//! Provides span creation and state-transition recording for items
//! flowing through the worker loop.

use tracing::Span;
use uuid::Uuid;

/// Start a span for processing one dequeued item.
///
/// The `item.state` field is declared empty and can be updated via
/// [`record_state_transition`].
pub fn start_item_span(queue: &str, worker_id: &Uuid) -> Span {
    tracing::info_span!(
        "item.process",
        "item.queue" = queue,
        "worker.id" = %worker_id,
        "item.state" = tracing::field::Empty,
    )
}

/// Record a state transition event on the given span.
///
/// Emits a tracing `info` event scoped to the span.
pub fn record_state_transition(span: &Span, from: &str, to: &str) {
    span.in_scope(|| {
        tracing::info!(from = from, to = to, "state_transition");
    });
}
