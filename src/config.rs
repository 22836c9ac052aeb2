//! Typed configuration from environment variables.
//!
//! Loads once at startup, fails fast if required vars are missing.
//! Sensitive values wrapped in secrecy::SecretString to prevent log leaks.

use crate::error::{Error, Result};
use crate::queue::QueueConfig;
use secrecy::SecretString;

#[derive(Debug)]
pub struct Config {
    pub redis_url: SecretString,
    pub queue_key: String,
    pub in_processing_key: String,
    pub otel_endpoint: Option<String>,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    /// In production, systemd EnvironmentFile provides the vars.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            redis_url: SecretString::from(required_var("REDIS_URL")?),
            queue_key: std::env::var("WORKQ_QUEUE_KEY")
                .unwrap_or_else(|_| "workq:pending".to_string()),
            in_processing_key: std::env::var("WORKQ_IN_PROCESSING_KEY")
                .unwrap_or_else(|_| "workq:in_processing".to_string()),
            otel_endpoint: std::env::var("OTEL_ENDPOINT").ok(),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.queue_key.is_empty() {
            return Err(Error::Config("WORKQ_QUEUE_KEY must not be empty".to_string()));
        }
        if self.in_processing_key.is_empty() {
            return Err(Error::Config(
                "WORKQ_IN_PROCESSING_KEY must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The queue-level configuration slice passed to the client.
    pub fn queue(&self) -> QueueConfig {
        QueueConfig {
            queue_key: self.queue_key.clone(),
            in_processing_key: self.in_processing_key.clone(),
        }
    }
}

fn required_var(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| Error::Config(format!("required environment variable {name} is not set")))
}
