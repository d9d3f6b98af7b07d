//! URL record entity owned by the persistent store.

use chrono::{DateTime, Utc};

/// A stored mapping from short code to destination URL, with its metadata.
///
/// The persistent store is the single source of truth for these records;
/// caches only ever hold a `code -> url` projection of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub code: String,
    pub requested_from: String,
    pub clicks: i64,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        url: String,
        created_at: DateTime<Utc>,
        code: String,
        requested_from: String,
        clicks: i64,
    ) -> Self {
        Self {
            url,
            created_at,
            code,
            requested_from,
            clicks,
        }
    }
}

/// Input data for creating a new record.
///
/// `created_at` and `clicks` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub url: String,
    pub code: String,
    pub requested_from: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_record_creation() {
        let now = Utc::now();
        let record = UrlRecord::new(
            "https://example.com".to_string(),
            now,
            "c984aed0".to_string(),
            "127.0.0.1".to_string(),
            0,
        );

        assert_eq!(record.url, "https://example.com");
        assert_eq!(record.code, "c984aed0");
        assert_eq!(record.requested_from, "127.0.0.1");
        assert_eq!(record.created_at, now);
        assert_eq!(record.clicks, 0);
    }
}
