//! Cache backend implementations.
//!
//! Concrete implementations of [`catalogue_core::cache::KeyValueCache`],
//! selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `memory` (default): In-memory LRU cache with tag tracking
//! - `redis`: Redis cache with tag tracking sets
//!
//! These features are mutually exclusive - only one cache backend can be
//! enabled at a time. The memory backend is always compiled for tests.

#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one cache backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "No cache backend selected. Enable 'memory' or 'redis' feature. \
    Example: cargo build -p catalogue --features memory"
);

#[cfg(any(feature = "memory", test))]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg(any(feature = "memory", test))]
pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;

/// Name of the compiled-in cache backend, reported by `/healthz`.
#[cfg(feature = "memory")]
pub const BACKEND_NAME: &str = "memory";

#[cfg(feature = "redis")]
pub const BACKEND_NAME: &str = "redis";
