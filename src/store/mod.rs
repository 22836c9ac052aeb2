//! Store collaborator contract and backends.
//!
//! The queue is built on a small set of key-value/list primitives plus two
//! combined operations that must execute as a single atomic step in the
//! backing store. Two backends: Redis for production, an in-memory map for
//! tests.

pub mod memory;
pub mod redis;

use crate::error::Result;
use async_trait::async_trait;

pub use self::memory::InMemoryStore;
pub use self::redis::RedisStore;

/// Key-value/list store primitives the queue relies on.
///
/// Single-command atomicity is assumed for every method: a `lpop` observed
/// by two callers never yields the same item twice.
#[async_trait]
pub trait Store: Send + Sync {
    /// Does the key exist? Lists that have been fully drained do not.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Read a scalar key. `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a scalar key, overwriting any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a key. Deleting an absent key is a no-op.
    async fn del(&self, key: &str) -> Result<()>;

    /// Push a value onto the head of a list.
    async fn lpush(&self, key: &str, value: &str) -> Result<()>;

    /// Push a value onto the tail of a list.
    async fn rpush(&self, key: &str, value: &str) -> Result<()>;

    /// Pop the head of a list. `None` if the list is empty or absent.
    async fn lpop(&self, key: &str) -> Result<Option<String>>;

    /// Length of a list. Absent lists have length 0.
    async fn llen(&self, key: &str) -> Result<u64>;

    /// Pop the head of `queue` and, if an item came off, record it under
    /// `marker` — as one atomic step. A crash can never observe the item
    /// popped but unmarked.
    async fn pop_and_mark(&self, queue: &str, marker: &str) -> Result<Option<String>>;

    /// Move the item recorded under `marker` (if any) back to the head of
    /// `queue` and clear the marker, as one atomic step. Returns the item
    /// that was restored.
    async fn restore_marked(&self, queue: &str, marker: &str) -> Result<Option<String>>;
}
