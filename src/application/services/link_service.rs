//! Link creation and listing service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::errors::StoreError;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::Cache;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::validate_url;

/// Service for creating and listing short links.
///
/// # Collision Strategy
///
/// Codes are derived from the URL, so retrying cannot produce a different
/// code. When the store reports the code as taken, the existing record is
/// read back:
///
/// - same URL: the create is idempotent and the existing record is returned
/// - different URL: the request is rejected with [`AppError::Collision`]
///
/// Existing mappings are never overwritten.
pub struct LinkService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn Cache>,
    base_url: String,
    max_url_length: usize,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn Cache>,
        base_url: String,
        max_url_length: usize,
    ) -> Self {
        Self {
            repository,
            cache,
            base_url,
            max_url_length,
        }
    }

    /// Validates `url`, derives its code, stores the mapping, then caches it.
    ///
    /// The cache is populated only after the store has confirmed the record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is rejected.
    /// Returns [`AppError::Collision`] if the code is bound to a different URL.
    /// Returns [`AppError::StoreUnavailable`] on store failures.
    pub async fn create(&self, url: &str, requester: &str) -> Result<UrlRecord, AppError> {
        let url = validate_url(url, self.max_url_length)?;
        let code = generate_code(&url);

        let new_record = NewUrlRecord {
            url,
            code,
            requested_from: requester.to_string(),
        };

        let record = match self.repository.create(new_record.clone()).await {
            Ok(record) => record,
            Err(StoreError::UniqueViolation { code }) => {
                self.existing_for(&code, &new_record.url).await?
            }
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = self.cache.put(&record.code, &record.url).await {
            warn!("Failed to cache {}: {}", record.code, e);
        }

        Ok(record)
    }

    /// Lists at most `limit` records, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<UrlRecord>, AppError> {
        Ok(self.repository.list_recent(limit).await?)
    }

    /// Lists the records created by `requester`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on store failures.
    pub async fn list_by_requester(&self, requester: &str) -> Result<Vec<UrlRecord>, AppError> {
        Ok(self.repository.list_by_requester(requester).await?)
    }

    /// Constructs the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/q/{}", self.base_url.trim_end_matches('/'), code)
    }

    /// Reads back the record that owns `code` after a uniqueness violation.
    async fn existing_for(&self, code: &str, url: &str) -> Result<UrlRecord, AppError> {
        match self.repository.find_by_code(code).await? {
            Some(existing) if existing.url == url => {
                debug!("{} already shortened as {}", url, code);
                Ok(existing)
            }
            Some(_) => {
                warn!("Short code collision on {} for {}", code, url);
                Err(AppError::collision(
                    "Short code already bound to a different URL",
                    json!({ "code": code }),
                ))
            }
            None => Err(AppError::store_unavailable(
                "Short code changed state during creation, retry",
                json!({ "code": code }),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::cache::BoundedCache;
    use chrono::Utc;
    use std::num::NonZeroUsize;

    fn stored(new_record: &NewUrlRecord) -> UrlRecord {
        UrlRecord::new(
            new_record.url.clone(),
            Utc::now(),
            new_record.code.clone(),
            new_record.requested_from.clone(),
            0,
        )
    }

    fn local_cache() -> Arc<BoundedCache> {
        Arc::new(BoundedCache::new(NonZeroUsize::new(16).unwrap()))
    }

    fn service(repo: MockUrlRepository, cache: Arc<BoundedCache>) -> LinkService {
        LinkService::new(
            Arc::new(repo),
            cache,
            "http://localhost:8080/".to_string(),
            2048,
        )
    }

    #[tokio::test]
    async fn test_create_success_populates_cache() {
        let mut repo = MockUrlRepository::new();
        repo.expect_create()
            .withf(|r| r.url == "https://example.com" && r.requested_from == "10.0.0.1")
            .times(1)
            .returning(|r| Ok(stored(&r)));

        let cache = local_cache();
        let service = service(repo, cache.clone());

        let record = service
            .create("https://example.com", "10.0.0.1")
            .await
            .unwrap();

        assert_eq!(record.code, generate_code("https://example.com"));
        assert_eq!(
            cache.lookup(&record.code).as_deref(),
            Some("https://example.com")
        );
    }

    #[tokio::test]
    async fn test_create_prepends_scheme_before_hashing() {
        let mut repo = MockUrlRepository::new();
        repo.expect_create()
            .withf(|r| r.url == "https://example.com" && r.code == generate_code("https://example.com"))
            .times(1)
            .returning(|r| Ok(stored(&r)));

        let service = service(repo, local_cache());

        let record = service.create("example.com", "10.0.0.1").await.unwrap();
        assert_eq!(record.url, "https://example.com");
    }

    #[tokio::test]
    async fn test_create_invalid_url_never_reaches_store() {
        let mut repo = MockUrlRepository::new();
        repo.expect_create().times(0);

        let service = service(repo, local_cache());

        let result = service.create("javascript:alert(1)", "10.0.0.1").await;
        assert!(matches!(result, Err(AppError::Validation { .. })));

        let result = service.create("", "10.0.0.1").await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_same_url_twice_is_idempotent() {
        let mut repo = MockUrlRepository::new();
        repo.expect_create().times(1).returning(|r| {
            Err(StoreError::UniqueViolation {
                code: r.code.clone(),
            })
        });
        repo.expect_find_by_code()
            .times(1)
            .returning(|code| {
                Ok(Some(UrlRecord::new(
                    "https://example.com".to_string(),
                    Utc::now(),
                    code.to_string(),
                    "10.0.0.2".to_string(),
                    7,
                )))
            });

        let cache = local_cache();
        let service = service(repo, cache.clone());

        let record = service
            .create("https://example.com", "10.0.0.1")
            .await
            .unwrap();

        assert_eq!(record.requested_from, "10.0.0.2");
        assert_eq!(record.clicks, 7);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_create_collision_is_rejected() {
        let mut repo = MockUrlRepository::new();
        repo.expect_create().times(1).returning(|r| {
            Err(StoreError::UniqueViolation {
                code: r.code.clone(),
            })
        });
        repo.expect_find_by_code().times(1).returning(|code| {
            Ok(Some(UrlRecord::new(
                "https://other.example.com".to_string(),
                Utc::now(),
                code.to_string(),
                "10.0.0.2".to_string(),
                0,
            )))
        });

        let cache = local_cache();
        let service = service(repo, cache.clone());

        let result = service.create("https://example.com", "10.0.0.1").await;

        assert!(matches!(result, Err(AppError::Collision { .. })));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_create_store_failure_leaves_cache_empty() {
        let mut repo = MockUrlRepository::new();
        repo.expect_create()
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection reset".to_string())));

        let cache = local_cache();
        let service = service(repo, cache.clone());

        let result = service.create("https://example.com", "10.0.0.1").await;

        assert!(matches!(result, Err(AppError::StoreUnavailable { .. })));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_list_recent_passes_limit() {
        let mut repo = MockUrlRepository::new();
        repo.expect_list_recent()
            .withf(|limit| *limit == 10)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = service(repo, local_cache());

        assert!(service.list_recent(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_requester() {
        let mut repo = MockUrlRepository::new();
        repo.expect_list_by_requester()
            .withf(|requester| requester == "10.0.0.1")
            .times(1)
            .returning(|requester| {
                Ok(vec![UrlRecord::new(
                    "https://example.com".to_string(),
                    Utc::now(),
                    "c984aed0".to_string(),
                    requester.to_string(),
                    0,
                )])
            });

        let service = service(repo, local_cache());

        let records = service.list_by_requester("10.0.0.1").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].requested_from, "10.0.0.1");
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let service = service(MockUrlRepository::new(), local_cache());
        assert_eq!(
            service.short_url("cbf43926"),
            "http://localhost:8080/q/cbf43926"
        );
    }
}
