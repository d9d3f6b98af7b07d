//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_valid_code;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /q/{code}`
///
/// Resolution goes through [`crate::application::services::CacheAsideResolver`];
/// the click is counted in the background. Responds with
/// `301 Moved Permanently` and a `Location` header.
///
/// # Errors
///
/// Returns 400 Bad Request if the code is not 8 lowercase hex characters.
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 503 Service Unavailable if the store is down on a cache miss.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    if !is_valid_code(&code) {
        return Err(AppError::bad_request(
            "Malformed short code",
            json!({ "code": code }),
        ));
    }

    let long_url = state.resolver.resolve(&code).await?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, long_url)]))
}
