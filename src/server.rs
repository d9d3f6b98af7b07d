//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, cache backend selection, the click worker,
//! and the Axum server lifecycle.

use crate::config::{CacheBackend, Config};
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::{BoundedCache, Cache, RedisCache};
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Local or Redis cache, per `CACHE_BACKEND`
/// - Background click worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The configured cache backend cannot be reached
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let cache = build_cache(&config).await?;

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);

    let repository: Arc<dyn UrlRepository> = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    tokio::spawn(run_click_worker(click_rx, repository.clone()));

    let state = AppState::new(
        repository,
        cache,
        click_tx,
        config.base_url.clone(),
        config.max_url_length,
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Builds the configured cache backend.
///
/// An unreachable Redis is a startup error; the service does not silently
/// run with a different backend than the one requested.
async fn build_cache(config: &Config) -> Result<Arc<dyn Cache>> {
    match config.cache_backend {
        CacheBackend::Local => {
            let capacity = NonZeroUsize::new(config.cache_capacity)
                .context("CACHE_CAPACITY must be at least 1")?;
            tracing::info!("Cache enabled (local, capacity {})", capacity);
            Ok(Arc::new(BoundedCache::new(capacity)))
        }
        CacheBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL must be set when CACHE_BACKEND=redis")?;
            let redis = RedisCache::connect(redis_url)
                .await
                .context("Failed to connect to Redis")?;
            tracing::info!("Cache enabled (Redis)");
            Ok(Arc::new(redis))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
