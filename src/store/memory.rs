//! In-memory store backend.
//!
//! Test double with Redis semantics: lists that drain to empty cease to
//! exist, and list/scalar commands against the wrong kind fail. Backed by
//! a dashmap; single-process only.

use crate::error::{Error, Result};
use crate::store::Store;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::VecDeque;

#[derive(Debug)]
enum Value {
    Scalar(String),
    List(VecDeque<String>),
}

/// Store backend over an in-process map.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    map: DashMap<String, Value>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn wrong_type(key: &str, expected: &'static str) -> Error {
    Error::WrongType {
        key: key.to_string(),
        expected,
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.map.contains_key(key))
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(entry) => match entry.value() {
                Value::Scalar(s) => Ok(Some(s.clone())),
                Value::List(_) => Err(wrong_type(key, "scalar")),
            },
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.map
            .insert(key.to_string(), Value::Scalar(value.to_string()));
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        self.map.remove(key);
        Ok(())
    }

    async fn lpush(&self, key: &str, value: &str) -> Result<()> {
        let mut entry = self
            .map
            .entry(key.to_string())
            .or_insert_with(|| Value::List(VecDeque::new()));
        match entry.value_mut() {
            Value::List(items) => {
                items.push_front(value.to_string());
                Ok(())
            }
            Value::Scalar(_) => Err(wrong_type(key, "list")),
        }
    }

    async fn rpush(&self, key: &str, value: &str) -> Result<()> {
        let mut entry = self
            .map
            .entry(key.to_string())
            .or_insert_with(|| Value::List(VecDeque::new()));
        match entry.value_mut() {
            Value::List(items) => {
                items.push_back(value.to_string());
                Ok(())
            }
            Value::Scalar(_) => Err(wrong_type(key, "list")),
        }
    }

    async fn lpop(&self, key: &str) -> Result<Option<String>> {
        let popped = match self.map.get_mut(key) {
            None => return Ok(None),
            Some(mut entry) => match entry.value_mut() {
                Value::List(items) => items.pop_front(),
                Value::Scalar(_) => return Err(wrong_type(key, "list")),
            },
        };
        // Drained lists are removed, matching Redis.
        self.map
            .remove_if(key, |_, v| matches!(v, Value::List(items) if items.is_empty()));
        Ok(popped)
    }

    async fn llen(&self, key: &str) -> Result<u64> {
        match self.map.get(key) {
            None => Ok(0),
            Some(entry) => match entry.value() {
                Value::List(items) => Ok(items.len() as u64),
                Value::Scalar(_) => Err(wrong_type(key, "list")),
            },
        }
    }

    // Atomic relative to a crash only in the trivial sense: this backend is
    // an in-process test double, so the two steps cannot be torn.
    async fn pop_and_mark(&self, queue: &str, marker: &str) -> Result<Option<String>> {
        let popped = self.lpop(queue).await?;
        if let Some(ref item) = popped {
            self.set(marker, item).await?;
        }
        Ok(popped)
    }

    async fn restore_marked(&self, queue: &str, marker: &str) -> Result<Option<String>> {
        match self.get(marker).await? {
            None => Ok(None),
            Some(item) => {
                self.lpush(queue, &item).await?;
                self.del(marker).await?;
                Ok(Some(item))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn drained_list_ceases_to_exist() {
        let store = InMemoryStore::new();
        store.rpush("q", "only").await.unwrap();
        assert!(store.exists("q").await.unwrap());

        assert_eq!(store.lpop("q").await.unwrap(), Some("only".to_string()));
        assert!(!store.exists("q").await.unwrap());
        assert_eq!(store.llen("q").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_command_on_scalar_fails() {
        let store = InMemoryStore::new();
        store.set("k", "v").await.unwrap();

        let err = store.lpop("k").await.unwrap_err();
        assert!(matches!(err, Error::WrongType { .. }));
    }
}
