//! In-memory cache backend.
//!
//! Thread-safe LRU cache with TTL support and tag tracking for
//! single-instance deployments.

mod cache;

pub use cache::MemoryCache;
