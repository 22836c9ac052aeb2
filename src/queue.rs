//! Work queue client: dequeue with in-processing marking, marker
//! management, crash recovery.
//!
//! One client per logical worker. The queue holds opaque string items in
//! FIFO order; the in-processing marker is a single scalar slot recording
//! the item currently claimed, so a restarted process can inspect it and
//! re-queue unfinished work.

use crate::error::{Error, Result};
use crate::model::QueueStatus;
use crate::store::Store;
use crate::telemetry::metrics;
use opentelemetry::KeyValue;

/// Construction-time configuration for a queue client.
///
/// Both keys are externally chosen constants; they are never computed.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// List key the producer pushes work onto.
    pub queue_key: String,
    /// Scalar key holding the item currently being processed.
    pub in_processing_key: String,
}

/// Client for a single-consumer work queue over a [`Store`].
pub struct WorkQueueClient<S> {
    store: S,
    config: QueueConfig,
}

impl<S: Store> WorkQueueClient<S> {
    /// Create a client. Fails if either configured key is empty.
    pub fn new(store: S, config: QueueConfig) -> Result<Self> {
        if config.queue_key.is_empty() {
            return Err(Error::Config("queue key must not be empty".to_string()));
        }
        if config.in_processing_key.is_empty() {
            return Err(Error::Config(
                "in-processing key must not be empty".to_string(),
            ));
        }
        Ok(Self { store, config })
    }

    /// The queue key this client consumes from.
    pub fn queue_key(&self) -> &str {
        &self.config.queue_key
    }

    /// Pop the head item and record it as in-processing, atomically.
    ///
    /// Returns `None` when the queue is empty or absent; the marker is left
    /// untouched in that case. On success the marker is overwritten with
    /// the popped item before this returns.
    pub async fn dequeue(&self) -> Result<Option<String>> {
        let item = self
            .store
            .pop_and_mark(&self.config.queue_key, &self.config.in_processing_key)
            .await?;
        metrics::queue_operations().add(
            1,
            &[
                KeyValue::new("queue", self.config.queue_key.clone()),
                KeyValue::new(
                    "operation",
                    if item.is_some() {
                        "dequeue"
                    } else {
                        "dequeue_empty"
                    },
                ),
            ],
        );
        Ok(item)
    }

    /// Unconditionally overwrite the in-processing marker with `item`.
    ///
    /// No validation against queue history; last write wins.
    pub async fn mark_in_processing(&self, item: &str) -> Result<()> {
        self.store
            .set(&self.config.in_processing_key, item)
            .await?;
        metrics::queue_operations().add(
            1,
            &[
                KeyValue::new("queue", self.config.queue_key.clone()),
                KeyValue::new("operation", "mark"),
            ],
        );
        Ok(())
    }

    /// Delete the in-processing marker. Idempotent.
    pub async fn clear_in_processing(&self) -> Result<()> {
        self.store.del(&self.config.in_processing_key).await?;
        metrics::queue_operations().add(
            1,
            &[
                KeyValue::new("queue", self.config.queue_key.clone()),
                KeyValue::new("operation", "clear"),
            ],
        );
        Ok(())
    }

    /// Read the in-processing marker without touching it.
    pub async fn in_processing(&self) -> Result<Option<String>> {
        self.store.get(&self.config.in_processing_key).await
    }

    /// Push an item onto the queue tail.
    pub async fn enqueue(&self, item: &str) -> Result<()> {
        self.store.rpush(&self.config.queue_key, item).await?;
        metrics::queue_operations().add(
            1,
            &[
                KeyValue::new("queue", self.config.queue_key.clone()),
                KeyValue::new("operation", "enqueue"),
            ],
        );
        Ok(())
    }

    /// Number of items waiting in the queue.
    pub async fn len(&self) -> Result<u64> {
        self.store.llen(&self.config.queue_key).await
    }

    /// Re-queue a leftover in-processing item at the queue head and clear
    /// the marker, atomically. Returns the restored item, or `None` when
    /// the marker was already clear.
    ///
    /// Intended for startup after a crash: the item goes back to the head
    /// so it is the next one dequeued.
    pub async fn recover(&self) -> Result<Option<String>> {
        let item = self
            .store
            .restore_marked(&self.config.queue_key, &self.config.in_processing_key)
            .await?;
        if item.is_some() {
            metrics::items_recovered().add(
                1,
                &[KeyValue::new("queue", self.config.queue_key.clone())],
            );
        }
        Ok(item)
    }

    /// Snapshot the queue length and marker for inspection.
    ///
    /// Two separate reads — not atomic with respect to a concurrent
    /// dequeue.
    pub async fn status(&self) -> Result<QueueStatus> {
        let len = self.len().await?;
        let in_processing = self.in_processing().await?;
        Ok(QueueStatus {
            queue_key: self.config.queue_key.clone(),
            len,
            in_processing,
        })
    }
}
