//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds the cached catalogue and the collaborators the
//! handlers consult before touching it, with the backend combination chosen
//! via feature flags.

use std::sync::Arc;

use catalogue_core::auth::{AccessControl, RoleAccessControl};
use catalogue_core::cache::KeyValueCache;
use catalogue_core::catalogue::{CatalogueCache, GameValidator, Validator};
use catalogue_core::storage::{CatalogueStore, UserRepository};

use crate::config::Config;

/// Shared application state.
///
/// This is cloned for each request handler; every field is a cheap handle.
#[derive(Clone)]
pub struct AppState {
    /// Read-through cache in front of the store. All game reads and writes go here.
    pub catalogue: CatalogueCache,
    /// Uncached store access, used by health checks and fixtures.
    pub store: Arc<dyn CatalogueStore>,
    pub users: Arc<dyn UserRepository>,
    pub access: Arc<dyn AccessControl>,
    pub validator: Arc<dyn Validator>,
}

impl AppState {
    /// Wires the catalogue over one repository serving both games and users.
    fn build<R>(repo: Arc<R>, cache: Arc<dyn KeyValueCache>, config: &Config) -> Self
    where
        R: CatalogueStore + UserRepository + 'static,
    {
        let store: Arc<dyn CatalogueStore> = repo.clone();
        let catalogue = CatalogueCache::new(store.clone(), cache).with_ttl(config.cache_ttl());

        Self {
            catalogue,
            store,
            users: repo,
            access: Arc::new(RoleAccessControl),
            validator: Arc::new(GameValidator),
        }
    }
}

#[cfg(test)]
impl Default for AppState {
    /// In-memory store and cache with default configuration.
    fn default() -> Self {
        let config = Config::default();
        Self::build(
            Arc::new(crate::storage::InMemoryRepository::new()),
            Arc::new(crate::cache::MemoryCache::new(config.cache_max_entries)),
            &config,
        )
    }
}

// ============================================================================
// Feature-specific constructors
// ============================================================================

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(InMemoryRepository::new());
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            Ok(Self::build(repo, cache, config))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(InMemoryRepository::new());
            let cache = Arc::new(RedisCache::new(&config.redis_url).await?);

            Ok(Self::build(repo, cache, config))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            Ok(Self::build(repo, cache, config))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "redis"))]
mod sqlite_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            let cache = Arc::new(RedisCache::new(&config.redis_url).await?);

            Ok(Self::build(repo, cache, config))
        }
    }
}
