use std::time::Duration;

use async_trait::async_trait;

use super::Result;

/// Key-value cache with tag-based bulk eviction.
///
/// Implementations must make a single `set` or `get` atomic, and must evict
/// every key recorded under a tag when that tag is invalidated.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value and records the key under every tag in `tags`.
    ///
    /// `ttl` of None means the entry lives until its tag is invalidated (or it
    /// is evicted for capacity).
    async fn set(&self, key: &str, value: &[u8], tags: &[&str], ttl: Option<Duration>)
        -> Result<()>;

    /// Evicts every key recorded under any of `tags`.
    async fn invalidate_tags(&self, tags: &[&str]) -> Result<()>;
}
