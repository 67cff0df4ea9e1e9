//! Redis cache implementation.
//!
//! Every tagged key is added to the Set at `tag:{tag}:_keys`. Writing a value
//! and recording its tags happen in one `MULTI`/`EXEC` transaction.
//!
//! # Non-Atomicity Safety
//!
//! Invalidation reads a tag's members, then deletes exactly those keys and
//! `SREM`s exactly those members in one transaction. The Set itself is never
//! deleted, so a key tagged between the read and the transaction keeps its
//! membership and is caught by the next invalidation. Redis drops the Set
//! once its last member is removed. Members whose key already expired are
//! harmless because `DEL` on a missing key is a no-op.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use catalogue_core::cache::{tag_tracking_key, KeyValueCache, Result};

use super::error::map_redis_error;

/// Redis cache backend using connection manager for pooling.
pub struct RedisCache {
    conn: redis::aio::ConnectionManager,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self { conn })
    }

    /// Deletes `members` and removes exactly them from `tracking_key`.
    async fn evict_members(&self, tracking_key: &str, members: &[String]) -> Result<()> {
        let mut conn = self.conn.clone();
        let mut pipe = redis::pipe();
        pipe.atomic();
        pipe.del(members).ignore();
        pipe.srem(tracking_key, members).ignore();

        let () = pipe
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueCache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        let result: Option<Vec<u8>> = conn.get(key).await.map_err(map_redis_error)?;
        Ok(result)
    }

    async fn set(
        &self,
        key: &str,
        value: &[u8],
        tags: &[&str],
        ttl: Option<Duration>,
    ) -> Result<()> {
        let mut conn = self.conn.clone();
        let mut pipe = redis::pipe();
        pipe.atomic();

        match ttl {
            Some(duration) => {
                let seconds = duration.as_secs().max(1);
                pipe.set_ex(key, value, seconds).ignore();
            }
            None => {
                pipe.set(key, value).ignore();
            }
        }

        for tag in tags {
            pipe.sadd(tag_tracking_key(tag), key).ignore();
        }

        let () = pipe
            .query_async(&mut conn)
            .await
            .map_err(map_redis_error)?;

        Ok(())
    }

    async fn invalidate_tags(&self, tags: &[&str]) -> Result<()> {
        let mut conn = self.conn.clone();

        for tag in tags {
            let tracking_key = tag_tracking_key(tag);

            let members: Vec<String> = conn
                .smembers(&tracking_key)
                .await
                .map_err(map_redis_error)?;

            if members.is_empty() {
                continue;
            }

            self.evict_members(&tracking_key, &members).await?;

            tracing::trace!(tag = %tag, evicted = members.len(), "Invalidated redis cache tag");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    /// Helper to get Redis URL from environment.
    fn redis_url() -> String {
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string())
    }

    /// Skip test if Redis not available.
    async fn get_test_cache() -> Option<RedisCache> {
        let cache = RedisCache::new(&redis_url()).await.ok()?;
        // Connecting may succeed lazily; probe with a real command.
        cache.get("test:redis_cache:probe").await.ok()?;
        Some(cache)
    }

    /// Generate a unique test key to avoid conflicts.
    fn test_key(suffix: &str) -> String {
        format!("test:redis_cache:{}:{}", Uuid::new_v4(), suffix)
    }

    /// Generate a unique tag so parallel tests do not invalidate each other.
    fn test_tag() -> String {
        format!("test-{}", Uuid::new_v4())
    }

    #[tokio::test]
    async fn test_redis_set_and_get() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("set_get");
        let tag = test_tag();

        cache.set(&key, b"hello world", &[tag.as_str()], None).await.unwrap();
        let result = cache.get(&key).await.unwrap();
        assert_eq!(result, Some(b"hello world".to_vec()));

        cache.invalidate_tags(&[tag.as_str()]).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_get_nonexistent() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let result = cache.get(&test_key("nonexistent")).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_redis_ttl() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let key = test_key("ttl");
        let tag = test_tag();

        cache
            .set(&key, b"expiring value", &[tag.as_str()], Some(Duration::from_secs(1)))
            .await
            .unwrap();
        assert!(cache.get(&key).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert!(cache.get(&key).await.unwrap().is_none());
        cache.invalidate_tags(&[tag.as_str()]).await.unwrap();
    }

    #[tokio::test]
    async fn test_redis_invalidate_tags() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let tag = test_tag();
        let other_tag = test_tag();
        let key1 = test_key("tagged_1");
        let key2 = test_key("tagged_2");
        let key3 = test_key("other");

        cache.set(&key1, b"1", &[tag.as_str()], None).await.unwrap();
        cache.set(&key2, b"2", &[tag.as_str()], None).await.unwrap();
        cache.set(&key3, b"3", &[other_tag.as_str()], None).await.unwrap();

        cache.invalidate_tags(&[tag.as_str()]).await.unwrap();

        assert!(cache.get(&key1).await.unwrap().is_none());
        assert!(cache.get(&key2).await.unwrap().is_none());
        assert!(cache.get(&key3).await.unwrap().is_some());

        // The tracking set itself is gone.
        let mut conn = cache.conn.clone();
        let exists: bool = conn.exists(tag_tracking_key(&tag)).await.unwrap();
        assert!(!exists);

        cache.invalidate_tags(&[other_tag.as_str()]).await.unwrap();
        assert!(cache.get(&key3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_redis_late_member_survives_invalidation_of_earlier_members() {
        let Some(cache) = get_test_cache().await else {
            eprintln!("Skipping test: Redis not available");
            return;
        };

        let tag = test_tag();
        let tracking_key = tag_tracking_key(&tag);
        let early = test_key("early");
        let late = test_key("late");
        let mut conn = cache.conn.clone();

        cache.set(&early, b"1", &[tag.as_str()], None).await.unwrap();
        let members: Vec<String> = conn.smembers(&tracking_key).await.unwrap();

        // A reader tags a key after the members were read.
        cache.set(&late, b"2", &[tag.as_str()], None).await.unwrap();

        cache.evict_members(&tracking_key, &members).await.unwrap();
        assert!(cache.get(&early).await.unwrap().is_none());

        let remaining: Vec<String> = conn.smembers(&tracking_key).await.unwrap();
        assert_eq!(remaining, vec![late.clone()]);

        cache.invalidate_tags(&[tag.as_str()]).await.unwrap();
        assert!(cache.get(&late).await.unwrap().is_none());
    }
}
