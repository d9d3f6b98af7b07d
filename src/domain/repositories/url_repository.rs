//! Repository trait for the persistent store of URL records.

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::errors::StoreResult;
use async_trait::async_trait;

/// Repository interface for the authoritative store of short links.
///
/// Calls may be slow; callers never hold a cache lock across them. Each
/// implementation owns its own timeout policy.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Durably records a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::errors::StoreError::UniqueViolation`] if the
    /// code is already bound to a record, whatever URL that record holds.
    ///
    /// Returns [`crate::domain::errors::StoreError::Unavailable`] on any other failure.
    async fn create(&self, new_record: NewUrlRecord) -> StoreResult<UrlRecord>;

    /// Finds the record bound to a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if found
    /// - `Ok(None)` if no record uses this code
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<UrlRecord>>;

    /// Adds one to the click counter of a record.
    ///
    /// Incrementing an unknown code is not an error.
    async fn increment_clicks(&self, code: &str) -> StoreResult<()>;

    /// Lists at most `limit` records, newest first.
    async fn list_recent(&self, limit: i64) -> StoreResult<Vec<UrlRecord>>;

    /// Lists all records created by a requester, newest first.
    async fn list_by_requester(&self, requester: &str) -> StoreResult<Vec<UrlRecord>>;

    /// Counts all records.
    async fn count(&self) -> StoreResult<i64>;

    /// Sums the click counters of all records.
    async fn total_clicks(&self) -> StoreResult<i64>;

    /// Checks that the store answers queries.
    async fn health_check(&self) -> bool;
}
