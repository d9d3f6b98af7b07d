//! In-process cache with a fixed capacity.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use tracing::debug;

use super::service::{Cache, CacheResult};

/// A capacity-bounded `code -> url` map shared by all request workers.
///
/// # Eviction
///
/// Inserting a new code while the cache is full first removes entries until
/// half of the pre-eviction size remains (rounded down). Victims are whatever
/// entries the underlying `HashMap` yields first; there is no recency or
/// frequency bookkeeping, so which entries survive is unspecified.
///
/// # Concurrency
///
/// The map sits behind one `RwLock`. Presence check, eviction and insert
/// happen under a single write guard, so concurrent puts cannot push the
/// size past capacity. Lookups take the read guard and always observe a
/// complete entry.
pub struct BoundedCache {
    entries: RwLock<HashMap<String, String>>,
    capacity: NonZeroUsize,
}

impl BoundedCache {
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: NonZeroUsize) -> Self {
        debug!("Using BoundedCache (capacity: {})", capacity);
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Maximum number of entries; fixed for the lifetime of the cache.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts `code -> url` if `code` is absent.
    ///
    /// Returns `true` if the entry was inserted, `false` if the code was
    /// already cached (the existing value is kept).
    pub fn insert_if_absent(&self, code: &str, url: &str) -> bool {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if entries.contains_key(code) {
            return false;
        }

        if entries.len() >= self.capacity.get() {
            evict_half(&mut entries);
        }

        entries.insert(code.to_string(), url.to_string());
        true
    }

    /// Returns a copy of the URL cached for `code`.
    pub fn lookup(&self, code: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .cloned()
    }
}

/// Shrinks the map to half its current size in iteration order.
fn evict_half(entries: &mut HashMap<String, String>) {
    let before = entries.len();
    let mut excess = before - before / 2;

    entries.retain(|_, _| {
        if excess > 0 {
            excess -= 1;
            false
        } else {
            true
        }
    });

    debug!("Cache EVICT: {} -> {} entries", before, entries.len());
}

#[async_trait]
impl Cache for BoundedCache {
    async fn put(&self, code: &str, url: &str) -> CacheResult<()> {
        if self.insert_if_absent(code, url) {
            debug!("Cache SET: {} -> {}", code, url);
        } else {
            debug!("Cache SET skipped, {} already cached", code);
        }
        Ok(())
    }

    async fn get(&self, code: &str) -> CacheResult<Option<String>> {
        Ok(self.lookup(code))
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}
