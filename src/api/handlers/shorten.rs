//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{ConnectInfo, State},
};
use std::net::SocketAddr;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates the short link for a URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "url": "https://example.com",
///   "code": "c984aed0",
///   "short_url": "http://localhost:8080/q/c984aed0",
///   "created_at": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// Submitting a URL that is already stored returns the existing record.
/// The requester is recorded as the client IP address.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is rejected.
/// Returns 409 Conflict if the derived code is bound to a different URL.
/// Returns 503 Service Unavailable if the store cannot be reached.
pub async fn shorten_handler(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let record = state
        .link_service
        .create(&payload.url, &addr.ip().to_string())
        .await?;

    let short_url = state.link_service.short_url(&record.code);

    Ok(Json(ShortenResponse {
        url: record.url,
        code: record.code,
        short_url,
        created_at: record.created_at,
    }))
}
