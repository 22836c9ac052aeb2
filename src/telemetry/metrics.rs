//! Metric instrument factories for workq-rs.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! All instruments are created lazily from the `"workq-rs"` meter.

use opentelemetry::metrics::{Counter, Histogram, Meter};

/// Returns the shared meter for workq-rs instruments.
fn meter() -> Meter {
    opentelemetry::global::meter("workq-rs")
}

/// Counter: queue-level operations (enqueue, dequeue, mark, clear).
/// Labels: `queue`, `operation`.
pub fn queue_operations() -> Counter<u64> {
    meter()
        .u64_counter("workq.queue.operations")
        .with_description("Number of queue operations")
        .build()
}

/// Counter: items handed to a handler by the worker loop.
/// Labels: `queue`, `result` ("ok" | "error").
pub fn items_processed() -> Counter<u64> {
    meter()
        .u64_counter("workq.items.processed")
        .with_description("Number of items processed by the worker")
        .build()
}

/// Counter: leftover in-processing items re-queued at startup.
/// Labels: `queue`.
pub fn items_recovered() -> Counter<u64> {
    meter()
        .u64_counter("workq.items.recovered")
        .with_description("Number of in-processing items re-queued on recovery")
        .build()
}

/// Histogram: operation duration in milliseconds.
/// Labels: `operation`.
pub fn operation_duration_ms() -> Histogram<f64> {
    meter()
        .f64_histogram("workq.operation.duration_ms")
        .with_description("Operation duration in milliseconds")
        .with_unit("ms")
        .build()
}
