//! Queue client behavior against the in-memory store.

use workq_rs::error::Error;
use workq_rs::queue::{QueueConfig, WorkQueueClient};
use workq_rs::store::InMemoryStore;

fn test_client() -> WorkQueueClient<InMemoryStore> {
    WorkQueueClient::new(
        InMemoryStore::new(),
        QueueConfig {
            queue_key: "test:pending".to_string(),
            in_processing_key: "test:in_processing".to_string(),
        },
    )
    .expect("failed to create client")
}

// ---------------------------------------------------------------------------
// Dequeue: pop + mark
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dequeue_pops_head_and_marks() {
    let client = test_client();
    for item in ["a", "b", "c"] {
        client.enqueue(item).await.unwrap();
    }

    let item = client.dequeue().await.unwrap();
    assert_eq!(item.as_deref(), Some("a"));
    assert_eq!(client.len().await.unwrap(), 2);
    assert_eq!(client.in_processing().await.unwrap().as_deref(), Some("a"));
}

#[tokio::test]
async fn dequeue_on_empty_queue_returns_none_and_keeps_marker() {
    let client = test_client();
    client.mark_in_processing("leftover").await.unwrap();

    let item = client.dequeue().await.unwrap();
    assert!(item.is_none());
    assert_eq!(
        client.in_processing().await.unwrap().as_deref(),
        Some("leftover")
    );
}

#[tokio::test]
async fn sequential_dequeues_preserve_fifo_order() {
    let client = test_client();
    client.enqueue("a").await.unwrap();
    client.enqueue("b").await.unwrap();

    assert_eq!(client.dequeue().await.unwrap().as_deref(), Some("a"));
    assert_eq!(client.dequeue().await.unwrap().as_deref(), Some("b"));
    assert!(client.dequeue().await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Marker lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn marker_holds_item_until_cleared() {
    let client = test_client();
    client.enqueue("x").await.unwrap();

    let item = client.dequeue().await.unwrap().unwrap();
    assert_eq!(client.in_processing().await.unwrap(), Some(item));

    client.clear_in_processing().await.unwrap();
    assert!(client.in_processing().await.unwrap().is_none());
}

#[tokio::test]
async fn clear_in_processing_is_idempotent() {
    let client = test_client();
    client.mark_in_processing("x").await.unwrap();

    client.clear_in_processing().await.unwrap();
    client.clear_in_processing().await.unwrap();
    assert!(client.in_processing().await.unwrap().is_none());
}

#[tokio::test]
async fn mark_in_processing_is_last_write_wins() {
    let client = test_client();
    client.mark_in_processing("x").await.unwrap();
    client.mark_in_processing("y").await.unwrap();

    assert_eq!(client.in_processing().await.unwrap().as_deref(), Some("y"));
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recover_requeues_marked_item_at_head() {
    let client = test_client();
    client.enqueue("b").await.unwrap();
    client.mark_in_processing("a").await.unwrap();

    let restored = client.recover().await.unwrap();
    assert_eq!(restored.as_deref(), Some("a"));
    assert!(client.in_processing().await.unwrap().is_none());

    // Restored item comes back first.
    assert_eq!(client.dequeue().await.unwrap().as_deref(), Some("a"));
    assert_eq!(client.dequeue().await.unwrap().as_deref(), Some("b"));
}

#[tokio::test]
async fn recover_with_clear_marker_is_noop() {
    let client = test_client();
    client.enqueue("a").await.unwrap();

    assert!(client.recover().await.unwrap().is_none());
    assert_eq!(client.len().await.unwrap(), 1);
}

// ---------------------------------------------------------------------------
// Status + construction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_reflects_len_and_marker() {
    let client = test_client();
    client.enqueue("a").await.unwrap();
    client.enqueue("b").await.unwrap();
    client.dequeue().await.unwrap();

    let status = client.status().await.unwrap();
    assert_eq!(status.queue_key, "test:pending");
    assert_eq!(status.len, 1);
    assert_eq!(status.in_processing.as_deref(), Some("a"));
}

#[tokio::test]
async fn empty_queue_key_is_rejected() {
    let result = WorkQueueClient::new(
        InMemoryStore::new(),
        QueueConfig {
            queue_key: String::new(),
            in_processing_key: "test:in_processing".to_string(),
        },
    );
    assert!(matches!(result, Err(Error::Config(_))));
}
