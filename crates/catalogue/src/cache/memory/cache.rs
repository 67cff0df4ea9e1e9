//! In-memory cache implementation with LRU eviction and tag tracking.
//!
//! Tag membership lives in a separate map next to the LRU store. A key leaves
//! its tag sets when the LRU evicts it, when it expires, or when its tag is
//! invalidated, so the tracked keys are always a subset of the stored keys.
//!
//! Every path that touches both maps takes the tag lock before the store lock
//! and holds both, so an invalidation never interleaves with a tagged write.

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use catalogue_core::cache::{KeyValueCache, Result};

/// A single cache entry with optional expiration.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn new(value: Vec<u8>, ttl: Option<Duration>) -> Self {
        let expires_at = ttl.map(|d| Instant::now() + d);
        Self { value, expires_at }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Instant::now() > exp)
    }
}

/// In-memory cache implementation with LRU eviction.
///
/// Uses `Arc<RwLock<LruCache>>` for concurrent access. Expired entries are
/// dropped lazily when read.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    /// Main key-value store with LRU eviction.
    store: Arc<RwLock<LruCache<String, CacheEntry>>>,
    /// Maps tag -> set of cache keys carrying it.
    tags: Arc<RwLock<HashMap<String, HashSet<String>>>>,
}

/// Drops `key` from every tag set, removing sets left empty.
fn untrack(tracking: &mut HashMap<String, HashSet<String>>, key: &str) {
    tracking.retain(|_, keys| {
        keys.remove(key);
        !keys.is_empty()
    });
}

impl MemoryCache {
    /// Creates a new in-memory cache holding at most `max_entries` keys.
    ///
    /// A capacity of 0 is raised to 1.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
            tags: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        {
            let mut store = self.store.write().await;
            match store.get(key) {
                Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expired: retake both locks in order to drop the entry and its tags.
        let mut tracking = self.tags.write().await;
        let mut store = self.store.write().await;
        if store.peek(key).is_some_and(CacheEntry::is_expired) {
            store.pop(key);
            untrack(&mut tracking, key);
        }
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        value: &[u8],
        tags: &[&str],
        ttl: Option<Duration>,
    ) -> Result<()> {
        let mut tracking = self.tags.write().await;
        let mut store = self.store.write().await;

        let displaced = store.push(key.to_string(), CacheEntry::new(value.to_vec(), ttl));
        if let Some((evicted, _)) = displaced.filter(|(old, _)| old != key) {
            untrack(&mut tracking, &evicted);
        }
        for tag in tags {
            tracking
                .entry((*tag).to_string())
                .or_default()
                .insert(key.to_string());
        }

        Ok(())
    }

    async fn invalidate_tags(&self, tags: &[&str]) -> Result<()> {
        let mut tracking = self.tags.write().await;
        let mut store = self.store.write().await;

        let mut evicted = 0usize;
        for tag in tags {
            let Some(keys) = tracking.remove(*tag) else {
                continue;
            };
            for key in &keys {
                if store.pop(key).is_some() {
                    evicted += 1;
                }
            }
        }

        tracing::trace!(?tags, evicted, "Invalidated memory cache tags");
        Ok(())
    }
}
