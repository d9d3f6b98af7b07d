//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "Connected" },
///     "cache": { "status": "ok", "message": "local backend" },
///     "click_queue": { "status": "ok", "message": "Free slots: 10000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store = if state.repository.health_check().await {
        CheckStatus::ok("Connected")
    } else {
        CheckStatus::error("Store unreachable")
    };

    let backend = state.cache.backend();
    let cache = if state.cache.health_check().await {
        CheckStatus::ok(format!("{backend} backend"))
    } else {
        CheckStatus::error(format!("{backend} backend unreachable"))
    };

    let click_queue = if state.click_sender.is_closed() {
        CheckStatus::error("Click worker stopped")
    } else {
        CheckStatus::ok(format!("Free slots: {}", state.click_sender.capacity()))
    };

    let all_healthy = store.is_ok() && cache.is_ok() && click_queue.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store,
            cache,
            click_queue,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
