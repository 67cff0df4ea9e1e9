//! Redis cache backend.
//!
//! Distributed cache for multi-instance deployments. Tag membership is kept
//! in Redis Sets so every instance sees the same invalidations.

mod cache;
mod error;

pub use cache::RedisCache;
