//! # workq-rs
//!
//! Redis-backed single-consumer work queue with an in-processing marker
//! for crash recovery.
//!
//! Provides the queue client (atomic dequeue-and-mark over a store
//! contract), a polling worker loop, and OpenTelemetry observability.

pub mod config;
pub mod error;
pub mod model;
pub mod queue;
pub mod store;
pub mod telemetry;
pub mod worker;
