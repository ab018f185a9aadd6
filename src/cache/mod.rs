//! # Cache Layer
//!
//! Key/value store with expiry used by the listing read path, plus the pub/sub
//! channel background jobs announce themselves on.
//!
//! Callers never surface a [`CacheError`]: a failed read is a miss and a failed
//! write or delete is logged and dropped.

pub mod memory;
pub mod redis;

pub use self::memory::{InMemoryCache, Published};
pub use self::redis::RedisCache;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors raised by a [`Cache`].
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

/// The cache operations the order service consumes.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Reads `key`. A missing or expired key is `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Stores `value` under `key` for `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// Publishes `message` on `channel`.
    async fn publish(&self, channel: &str, message: &str) -> Result<(), CacheError>;

    /// Checks that the cache is reachable.
    async fn ping(&self) -> Result<(), CacheError>;
}
