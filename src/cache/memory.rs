//! In-process [`Cache`].

use super::{Cache, CacheError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::Instant;

/// A message seen on a pub/sub channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub channel: String,
    pub message: String,
}

/// A [`Cache`] kept in memory.
///
/// Expiry is measured with [`tokio::time::Instant`], so tests running with
/// paused time can step past a TTL. Published messages are broadcast to every
/// [`subscribe`](Self::subscribe)r.
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
    published: broadcast::Sender<Published>,
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCache {
    pub fn new() -> Self {
        let (published, _) = broadcast::channel(256);
        Self {
            entries: Mutex::new(HashMap::new()),
            published,
        }
    }

    /// Receives every message published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Published> {
        self.published.subscribe()
    }

    /// Whether `key` currently holds an unexpired value.
    pub fn contains(&self, key: &str) -> bool {
        self.lock()
            .get(key)
            .is_some_and(|(_, expires_at)| *expires_at > Instant::now())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, (String, Instant)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.lock()
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.lock().remove(key);
        Ok(())
    }

    async fn publish(&self, channel: &str, message: &str) -> Result<(), CacheError> {
        // No subscribers is fine, same as PUBLISH to an empty channel.
        let _ = self.published.send(Published {
            channel: channel.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_value_expires_after_ttl() {
        let cache = InMemoryCache::new();
        cache
            .set("orders:all", "[]", Duration::from_secs(300))
            .await
            .unwrap();

        tokio::time::advance(Duration::from_secs(299)).await;
        assert_eq!(cache.get("orders:all").await.unwrap().as_deref(), Some("[]"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.get("orders:all").await.unwrap(), None);
        assert!(!cache.contains("orders:all"));
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let cache = InMemoryCache::new();
        cache.delete("nothing").await.unwrap();
    }

    #[tokio::test]
    async fn test_subscribers_see_published_messages() {
        let cache = InMemoryCache::new();
        let mut events = cache.subscribe();

        cache.publish("orders:processed", "{}").await.unwrap();

        let published = events.recv().await.unwrap();
        assert_eq!(published.channel, "orders:processed");
        assert_eq!(published.message, "{}");
    }
}
