//! Translation of `sqlx` failures into store errors.

use crate::domain::errors::StoreError;

/// Name of the uniqueness constraint on `urls.short`.
pub const CODE_UNIQUE_CONSTRAINT: &str = "urls_short_key";

/// Returns true if `e` is a unique violation of the short code column.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(CODE_UNIQUE_CONSTRAINT))
}

/// Maps any other `sqlx` failure to [`StoreError::Unavailable`].
///
/// Never produces a "not found" outcome: absent rows are handled with
/// `fetch_optional` before errors reach this point.
pub fn map_sqlx_error(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}
