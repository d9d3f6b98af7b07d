//! Redis-backed cache implementation.

use super::service::{Cache, CacheError, CacheResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

/// Remote cache shared by every service instance pointing at the same Redis.
///
/// Keys carry no TTL and the cache applies no capacity bound; Redis' own
/// `maxmemory` policy, which this service does not control, is the only
/// thing that removes entries. Writes use `SETNX`, so the presence check
/// and the write are one atomic step on the server.
///
/// Connection and command failures are returned as [`CacheError::Unavailable`]
/// rather than folded into misses.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Unavailable`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::Unavailable(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::Unavailable(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Unavailable(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "url:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn put(&self, code: &str, url: &str) -> CacheResult<()> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();

        let written = conn
            .set_nx::<_, _, bool>(&key, url)
            .await
            .map_err(|e| CacheError::Unavailable(format!("Redis SETNX failed: {}", e)))?;

        if written {
            debug!("Cache SET: {} -> {}", code, url);
        } else {
            debug!("Cache SET skipped, {} already cached", code);
        }
        Ok(())
    }

    async fn get(&self, code: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(code);
        let mut conn = self.client.clone();

        conn.get::<_, Option<String>>(&key)
            .await
            .map_err(|e| CacheError::Unavailable(format!("Redis GET failed: {}", e)))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
