//! Handlers for listing stored records.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::api::dto::urls::{RecentQuery, UrlListResponse, UrlRecordDto};
use crate::domain::entities::UrlRecord;
use crate::error::AppError;
use crate::state::AppState;

/// Lists the most recently created records.
///
/// # Endpoint
///
/// `GET /api/urls?limit=10`
///
/// `limit` defaults to 10 and must be between 1 and 100.
pub async fn recent_urls_handler(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<UrlListResponse>, AppError> {
    query.validate()?;

    let records = state.link_service.list_recent(query.limit).await?;

    Ok(Json(to_response(&state, records)))
}

/// Lists the records created by one requester.
///
/// # Endpoint
///
/// `GET /api/urls/requester/{requester}`
pub async fn requester_urls_handler(
    State(state): State<AppState>,
    Path(requester): Path<String>,
) -> Result<Json<UrlListResponse>, AppError> {
    let records = state.link_service.list_by_requester(&requester).await?;

    Ok(Json(to_response(&state, records)))
}

fn to_response(state: &AppState, records: Vec<UrlRecord>) -> UrlListResponse {
    let items = records
        .into_iter()
        .map(|record| {
            let short_url = state.link_service.short_url(&record.code);
            UrlRecordDto::from_record(record, short_url)
        })
        .collect();

    UrlListResponse::new(items)
}
