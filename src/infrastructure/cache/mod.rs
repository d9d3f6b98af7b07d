//! Caching layer for fast short code lookups.
//!
//! Provides a [`Cache`] trait with two interchangeable backends:
//! - [`BoundedCache`] - In-process map with a fixed capacity and half-eviction
//! - [`RedisCache`] - Remote Redis cache with no bound and no expiry
//!
//! The backend is picked at startup from [`crate::config::CacheBackend`];
//! everything above this layer depends only on the trait.

mod bounded_cache;
mod redis_cache;
mod service;

pub use bounded_cache::BoundedCache;
pub use redis_cache::RedisCache;
pub use service::{Cache, CacheError, CacheResult};
