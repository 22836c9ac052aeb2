//! Redis store backend.
//!
//! One `ConnectionManager` shared by value; it reconnects on failure and is
//! cheap to clone per command. Command and connectivity errors surface as
//! `redis::RedisError` unchanged — no retry at this layer.

use crate::error::Result;
use crate::store::Store;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};
use std::sync::LazyLock;

// LPOP + SET as one EVAL so a crash between the two cannot lose the item.
static POP_AND_MARK: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
local item = redis.call('LPOP', KEYS[1])
if item then
    redis.call('SET', KEYS[2], item)
end
return item
"#,
    )
});

static RESTORE_MARKED: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
local item = redis.call('GET', KEYS[2])
if item then
    redis.call('LPUSH', KEYS[1], item)
    redis.call('DEL', KEYS[2])
end
return item
"#,
    )
});

/// Store backend over a Redis server.
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Open a client and establish the managed connection.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }

    /// Simple health check — round-trip a PING.
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl Store for RedisStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        let exists: bool = conn.exists(key).await?;
        Ok(exists)
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.set(key, value).await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    async fn lpush(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.lpush(key, value).await?;
        Ok(())
    }

    async fn rpush(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.rpush(key, value).await?;
        Ok(())
    }

    async fn lpop(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.lpop(key, None).await?;
        Ok(value)
    }

    async fn llen(&self, key: &str) -> Result<u64> {
        let mut conn = self.conn.clone();
        let len: u64 = conn.llen(key).await?;
        Ok(len)
    }

    async fn pop_and_mark(&self, queue: &str, marker: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let item: Option<String> = POP_AND_MARK
            .key(queue)
            .key(marker)
            .invoke_async(&mut conn)
            .await?;
        Ok(item)
    }

    async fn restore_marked(&self, queue: &str, marker: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let item: Option<String> = RESTORE_MARKED
            .key(queue)
            .key(marker)
            .invoke_async(&mut conn)
            .await?;
        Ok(item)
    }
}
