//! Cache capability trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
///
/// A missing key is never an error; [`Cache::get`] signals it with `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// The backend could not be reached or rejected the command.
    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// A short code to destination URL cache.
///
/// Entries are write-once: [`Cache::put`] never replaces the value of a code
/// that is already cached. There is no delete and no expiry; entries leave a
/// cache only through its own eviction.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::BoundedCache`] - In-process, capacity-bounded map
/// - [`crate::infrastructure::cache::RedisCache`] - Remote Redis-backed cache, unbounded
#[async_trait]
pub trait Cache: Send + Sync {
    /// Stores `code -> url` unless `code` is already present.
    ///
    /// # Errors
    ///
    /// Only remote backends fail, with [`CacheError::Unavailable`].
    async fn put(&self, code: &str, url: &str) -> CacheResult<()>;

    /// Looks up the URL cached for `code`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` on cache hit
    /// - `Ok(None)` on cache miss
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Unavailable`] when the backend cannot answer.
    /// Callers may read the store instead, but must never report the key
    /// as not found on the strength of this error.
    async fn get(&self, code: &str) -> CacheResult<Option<String>>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health reports.
    fn backend(&self) -> &'static str;
}
