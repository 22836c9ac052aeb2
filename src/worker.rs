//! Worker loop: claim items, hand them to a handler, retire the marker.
//!
//! Single consumer, at most one item in flight. The loop never retries:
//! a handler failure propagates to the caller with the in-processing
//! marker still set, so an operator (or the next startup) can inspect or
//! re-queue the item.

use crate::error::Result;
use crate::queue::WorkQueueClient;
use crate::store::Store;
use crate::telemetry::metrics;
use crate::telemetry::queue::{record_state_transition, start_item_span};
use opentelemetry::KeyValue;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use tracing::{Instrument, error, info};
use uuid::Uuid;

/// Processes one dequeued item.
#[async_trait::async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, item: &str) -> Result<()>;
}

/// Configuration for the worker loop.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// How long to sleep when the queue is empty.
    pub poll_interval: Duration,
    /// Re-queue a leftover in-processing item before consuming.
    pub recover_on_start: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            recover_on_start: true,
        }
    }
}

/// The consumption loop over a [`WorkQueueClient`].
pub struct Worker<S, H> {
    client: WorkQueueClient<S>,
    handler: H,
    config: WorkerConfig,
    shutdown: Arc<Notify>,
    id: Uuid,
}

impl<S: Store, H: Handler> Worker<S, H> {
    pub fn new(client: WorkQueueClient<S>, handler: H, config: WorkerConfig) -> Self {
        Self {
            client,
            handler,
            config,
            shutdown: Arc::new(Notify::new()),
            id: Uuid::new_v4(),
        }
    }

    /// This worker's identity, carried in processing spans.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The underlying queue client, for inspection.
    pub fn client(&self) -> &WorkQueueClient<S> {
        &self.client
    }

    /// Handle that signals the loop to stop once it goes idle.
    pub fn shutdown_signal(&self) -> Arc<Notify> {
        Arc::clone(&self.shutdown)
    }

    /// Claim and process one item.
    ///
    /// Returns `Ok(false)` when the queue was empty. On handler failure the
    /// error propagates with the marker left set.
    pub async fn process_next(&self) -> Result<bool> {
        let item = match self.client.dequeue().await? {
            Some(item) => item,
            None => return Ok(false),
        };

        let span = start_item_span(self.client.queue_key(), &self.id);
        record_state_transition(&span, "idle", "in_processing");

        let started = Instant::now();
        let result = self.handler.handle(&item).instrument(span.clone()).await;
        let duration_ms = started.elapsed().as_millis() as f64;

        metrics::operation_duration_ms()
            .record(duration_ms, &[KeyValue::new("operation", "item.process")]);
        metrics::items_processed().add(
            1,
            &[
                KeyValue::new("queue", self.client.queue_key().to_string()),
                KeyValue::new(
                    "result",
                    if result.is_ok() { "ok" } else { "error" },
                ),
            ],
        );

        match result {
            Ok(()) => {
                record_state_transition(&span, "in_processing", "idle");
                self.client.clear_in_processing().await?;
                Ok(true)
            }
            Err(e) => {
                // Marker intentionally left set: `workq recover` or the next
                // startup re-queues the item.
                error!(worker_id = %self.id, %e, "handler failed, item left in-processing");
                Err(e)
            }
        }
    }

    /// Process items until the queue is empty. Returns the number handled.
    pub async fn drain(&self) -> Result<u64> {
        let mut processed = 0;
        while self.process_next().await? {
            processed += 1;
        }
        Ok(processed)
    }

    /// Run until shutdown is signalled.
    ///
    /// Optionally restores a leftover in-processing item first, then
    /// alternates between draining the queue and sleeping for the poll
    /// interval. Handler errors end the loop.
    pub async fn run(&self) -> Result<()> {
        if self.config.recover_on_start {
            if let Some(item) = self.client.recover().await? {
                info!(worker_id = %self.id, item, "re-queued leftover in-processing item");
            }
        }

        info!(worker_id = %self.id, queue = self.client.queue_key(), "worker started");

        loop {
            self.drain().await?;

            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!(worker_id = %self.id, "worker shutting down");
                    return Ok(());
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }
    }
}
