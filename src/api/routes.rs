//! API route configuration.

use crate::api::handlers::{recent_urls_handler, requester_urls_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`                   - Create a short link
/// - `GET  /urls`                      - Most recent records (`?limit=`)
/// - `GET  /urls/requester/{requester}` - Records created by one requester
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(recent_urls_handler))
        .route("/urls/requester/{requester}", get(requester_urls_handler))
}
