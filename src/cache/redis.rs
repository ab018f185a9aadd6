//! Redis-backed [`Cache`].

use super::{Cache, CacheError};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::info;

/// Cache on a Redis [`ConnectionManager`].
///
/// The manager is created on first use and retried on every call until it
/// connects. Once up it reconnects on its own and is cheap to clone, so every
/// call works on its own clone.
#[derive(Clone)]
pub struct RedisCache {
    client: Client,
    conn_manager: Arc<OnceCell<ConnectionManager>>,
}

impl RedisCache {
    /// Prepares a cache for `redis_url` (e.g. `redis://127.0.0.1:6379`)
    /// without connecting.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid.
    pub fn open(redis_url: &str) -> Result<Self, CacheError> {
        Ok(Self {
            client: Client::open(redis_url)?,
            conn_manager: Arc::new(OnceCell::new()),
        })
    }

    /// Connects to Redis at `redis_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or the first connection fails.
    pub async fn connect(redis_url: &str) -> Result<Self, CacheError> {
        let cache = Self::open(redis_url)?;
        cache.connection().await?;
        Ok(cache)
    }

    async fn connection(&self) -> Result<ConnectionManager, CacheError> {
        let manager = self
            .conn_manager
            .get_or_try_init(|| async {
                let manager = ConnectionManager::new(self.client.clone()).await?;
                info!("Connected to Redis");
                Ok::<_, CacheError>(manager)
            })
            .await?;
        Ok(manager.clone())
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        // SET EX rejects a zero expiry.
        let seconds = ttl.as_secs().max(1);
        let _: () = conn.set_ex(key, value, seconds).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let _: i64 = conn.del(key).await?;
        Ok(())
    }

    async fn publish(&self, channel: &str, message: &str) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let _: i64 = conn.publish(channel, message).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.connection().await?;
        let reply: String = redis::cmd("PING").query_async(&mut conn).await?;
        if reply == "PONG" {
            Ok(())
        } else {
            Err(CacheError::Unavailable(format!("unexpected PING reply: {reply}")))
        }
    }
}
