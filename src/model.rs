//! Core data model.
//!
//! Work items are opaque strings owned by the producer; the queue never
//! interprets them. The only structured type is the status snapshot used
//! for inspection.

use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of a queue and its in-processing marker.
///
/// Produced by [`crate::queue::WorkQueueClient::status`]. The two fields
/// are read with separate commands, so the snapshot is not atomic — a
/// concurrent dequeue can move an item between them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueStatus {
    /// Key of the queue this snapshot describes.
    pub queue_key: String,

    /// Number of items waiting in the queue.
    pub len: u64,

    /// Item currently claimed by the worker, if any.
    pub in_processing: Option<String>,
}
