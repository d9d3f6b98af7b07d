mod common;

use axum_test::TestServer;
use quicklink::domain::click_worker::run_click_worker;
use quicklink::domain::repositories::UrlRepository;
use quicklink::infrastructure::cache::BoundedCache;
use quicklink::routes::router;
use quicklink::state::AppState;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Full router with a running click worker behind it.
fn start(repository: Arc<common::MemoryUrlRepository>) -> (TestServer, JoinHandle<()>) {
    let cache = Arc::new(BoundedCache::new(NonZeroUsize::new(16).unwrap()));
    let (tx, rx) = mpsc::channel(100);
    let worker = tokio::spawn(run_click_worker(rx, repository.clone()));

    let state = AppState::new(
        repository,
        cache,
        tx,
        common::BASE_URL.to_string(),
        2048,
    );

    (TestServer::new(router(state)).unwrap(), worker)
}

async fn wait_for_clicks(repo: &common::MemoryUrlRepository, code: &str, expected: i64) {
    for _ in 0..100 {
        if repo.clicks(code) == Some(expected) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!(
        "expected {expected} clicks for {code}, got {:?}",
        repo.clicks(code)
    );
}

#[tokio::test]
async fn test_redirects_are_counted_by_worker() {
    let repository = Arc::new(common::MemoryUrlRepository::new());
    repository.seed("ff295cdb", "https://example.com", "10.0.0.1");
    let (server, worker) = start(repository.clone());

    for _ in 0..3 {
        assert_eq!(server.get("/q/ff295cdb").await.status_code(), 301);
    }

    wait_for_clicks(&repository, "ff295cdb", 3).await;
    assert_eq!(repository.total_clicks().await.unwrap(), 3);

    drop(server);
    worker.abort();
}

#[tokio::test]
async fn test_failed_redirect_is_not_counted() {
    let repository = Arc::new(common::MemoryUrlRepository::new());
    repository.seed("ff295cdb", "https://example.com", "10.0.0.1");
    let (server, worker) = start(repository.clone());

    server.get("/q/00000000").await.assert_status_not_found();
    server.get("/q/ff295cdb").await;

    wait_for_clicks(&repository, "ff295cdb", 1).await;
    assert_eq!(repository.total_clicks().await.unwrap(), 1);

    drop(server);
    worker.abort();
}
