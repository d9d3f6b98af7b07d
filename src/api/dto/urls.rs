//! DTOs for record listing endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlRecord;

fn default_limit() -> i64 {
    10
}

/// Query parameters for `GET /api/urls`.
#[derive(Debug, Deserialize, Validate)]
pub struct RecentQuery {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
}

/// One stored record as exposed by the API.
#[derive(Debug, Serialize, Deserialize)]
pub struct UrlRecordDto {
    pub url: String,
    pub code: String,
    pub short_url: String,
    pub requested_from: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl UrlRecordDto {
    pub fn from_record(record: UrlRecord, short_url: String) -> Self {
        Self {
            url: record.url,
            code: record.code,
            short_url,
            requested_from: record.requested_from,
            clicks: record.clicks,
            created_at: record.created_at,
        }
    }
}

/// List of records, newest first.
#[derive(Debug, Serialize, Deserialize)]
pub struct UrlListResponse {
    pub total: usize,
    pub items: Vec<UrlRecordDto>,
}

impl UrlListResponse {
    pub fn new(items: Vec<UrlRecordDto>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}
