//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten one URL.
///
/// Only presence is checked here; the full URL rules live in
/// [`crate::utils::url_validator`].
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, message = "URL is required"))]
    pub url: String,
}

/// Response for a created (or already existing) short link.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub url: String,
    pub code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}
