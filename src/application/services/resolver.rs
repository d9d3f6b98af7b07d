//! Cache-aside resolution of short codes.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, error, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::Cache;

/// Resolves short codes through the cache, falling back to the store.
///
/// # Request Flow
///
/// 1. Look the code up in the cache
/// 2. On miss, query the store; if the store has no record, return NotFound
/// 3. On store hit, populate the cache with the store's URL
/// 4. Queue a click for the code and return the URL from whichever source produced it
///
/// A cache failure is logged and handled like a miss. A store failure is
/// returned as [`AppError::StoreUnavailable`], never as NotFound. Click
/// accounting is fire-and-forget; a full queue drops the click.
///
/// An empty URL is never returned or cached. An empty cache entry is read
/// through to the store, and an empty stored URL is [`AppError::Internal`].
///
/// The resolver never holds a cache lock across a store call: each cache
/// operation is its own critical section.
pub struct CacheAsideResolver {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn Cache>,
    click_sender: mpsc::Sender<ClickEvent>,
}

impl CacheAsideResolver {
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn Cache>,
        click_sender: mpsc::Sender<ClickEvent>,
    ) -> Self {
        Self {
            repository,
            cache,
            click_sender,
        }
    }

    /// Returns the destination URL for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if neither the cache nor the store know the code.
    /// Returns [`AppError::StoreUnavailable`] if the store could not be queried on a miss.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        let url = match self.cache.get(code).await {
            Ok(Some(url)) if !url.is_empty() => {
                metrics::counter!("cache_requests_total", "result" => "hit").increment(1);
                debug!("Cache HIT for {}", code);
                url
            }
            Ok(Some(_)) => {
                metrics::counter!("cache_requests_total", "result" => "error").increment(1);
                warn!("Cache holds an empty URL for {}, reading store", code);
                self.load_from_store(code).await?
            }
            Ok(None) => {
                metrics::counter!("cache_requests_total", "result" => "miss").increment(1);
                debug!("Cache MISS for {}", code);
                self.load_from_store(code).await?
            }
            Err(e) => {
                metrics::counter!("cache_requests_total", "result" => "error").increment(1);
                warn!("Cache error for {}, falling back to store: {}", code, e);
                self.load_from_store(code).await?
            }
        };

        self.record_click(code);

        Ok(url)
    }

    async fn load_from_store(&self, code: &str) -> Result<String, AppError> {
        metrics::counter!("store_lookups_total").increment(1);

        let record = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

        if record.url.is_empty() {
            error!("Stored URL for {} is empty", code);
            return Err(AppError::internal(
                "Short link has no destination",
                json!({ "code": code }),
            ));
        }

        if let Err(e) = self.cache.put(code, &record.url).await {
            warn!("Failed to cache {}: {}", code, e);
        }

        Ok(record.url)
    }

    fn record_click(&self, code: &str) {
        match self.click_sender.try_send(ClickEvent::new(code)) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                warn!("Click queue full, dropping click for {}", event.code);
            }
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                warn!("Click queue closed, dropping click for {}", event.code);
            }
        }
    }
}
