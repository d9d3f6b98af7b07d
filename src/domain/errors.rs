//! Errors reported by the persistent store.

/// Failures of a [`crate::domain::repositories::UrlRepository`] call.
///
/// An absent record is not an error: lookups return `Ok(None)`. Keeping
/// "no such code" out of this type means a store outage can never be
/// mistaken for a missing link.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The short code is already bound to a record.
    #[error("short code '{code}' is already taken")]
    UniqueViolation { code: String },

    /// The store could not be reached or failed the operation. Retryable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
