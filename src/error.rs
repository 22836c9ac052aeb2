//! Error types for workq-rs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    /// Store connectivity/command errors, surfaced unchanged.
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("wrong value kind at key {key}: expected {expected}")]
    WrongType {
        key: String,
        expected: &'static str,
    },

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
