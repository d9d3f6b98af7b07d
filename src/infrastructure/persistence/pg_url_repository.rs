//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlRecord, UrlRecord};
use crate::domain::errors::{StoreError, StoreResult};
use crate::domain::repositories::UrlRepository;
use crate::utils::db_error::{is_unique_violation_on_code, map_sqlx_error};

/// Row shape of the `urls` table.
#[derive(sqlx::FromRow)]
struct UrlRow {
    name: String,
    created_at: DateTime<Utc>,
    short: String,
    requested_from: String,
    clicks: i64,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::new(
            row.name,
            row.created_at,
            row.short,
            row.requested_from,
            row.clicks,
        )
    }
}

/// PostgreSQL repository for short link storage and click counting.
///
/// The `urls_short_key` constraint is what detects short code collisions.
/// Query timeouts come from the pool's acquire timeout.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> StoreResult<UrlRecord> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (name, short, requested_from)
            VALUES ($1, $2, $3)
            RETURNING name, created_at, short, requested_from, clicks
            "#,
        )
        .bind(&new_record.url)
        .bind(&new_record.code)
        .bind(&new_record.requested_from)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_code(&e) {
                StoreError::UniqueViolation {
                    code: new_record.code.clone(),
                }
            } else {
                map_sqlx_error(e)
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> StoreResult<Option<UrlRecord>> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT name, created_at, short, requested_from, clicks
            FROM urls
            WHERE short = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UrlRecord::from))
    }

    async fn increment_clicks(&self, code: &str) -> StoreResult<()> {
        sqlx::query("UPDATE urls SET clicks = clicks + 1 WHERE short = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> StoreResult<Vec<UrlRecord>> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT name, created_at, short, requested_from, clicks
            FROM urls
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(UrlRecord::from).collect())
    }

    async fn list_by_requester(&self, requester: &str) -> StoreResult<Vec<UrlRecord>> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT name, created_at, short, requested_from, clicks
            FROM urls
            WHERE requested_from = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(requester)
        .fetch_all(self.pool.as_ref())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(UrlRecord::from).collect())
    }

    async fn count(&self) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }

    async fn total_clicks(&self) -> StoreResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM urls")
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(map_sqlx_error)
    }

    async fn health_check(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(self.pool.as_ref())
            .await
            .is_ok()
    }
}
