#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use chrono::{Duration, Utc};
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tower::Layer;

use quicklink::domain::click_event::ClickEvent;
use quicklink::domain::entities::{NewUrlRecord, UrlRecord};
use quicklink::domain::errors::{StoreError, StoreResult};
use quicklink::domain::repositories::UrlRepository;
use quicklink::infrastructure::cache::BoundedCache;
use quicklink::state::AppState;

pub const BASE_URL: &str = "http://sho.rt";

/// In-memory store with the same uniqueness rule as the `urls` table.
#[derive(Default)]
pub struct MemoryUrlRepository {
    records: Mutex<Vec<UrlRecord>>,
    lookups: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record directly, bypassing validation and code derivation.
    ///
    /// Each seeded record is one second newer than the previous one.
    pub fn seed(&self, code: &str, url: &str, requested_from: &str) {
        let mut records = self.records.lock().unwrap();
        let created_at = Utc::now() + Duration::seconds(records.len() as i64);
        records.push(UrlRecord::new(
            url.to_string(),
            created_at,
            code.to_string(),
            requested_from.to_string(),
            0,
        ));
    }

    /// Number of `find_by_code` calls so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn clicks(&self, code: &str) -> Option<i64> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.code == code)
            .map(|r| r.clicks)
    }

    /// Makes every subsequent call fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn newest_first(mut records: Vec<UrlRecord>) -> Vec<UrlRecord> {
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> StoreResult<UrlRecord> {
        self.check_available()?;

        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.code == new_record.code) {
            return Err(StoreError::UniqueViolation {
                code: new_record.code,
            });
        }

        let record = UrlRecord::new(
            new_record.url,
            Utc::now() + Duration::seconds(records.len() as i64),
            new_record.code,
            new_record.requested_from,
            0,
        );
        records.push(record.clone());

        Ok(record)
    }

    async fn find_by_code(&self, code: &str) -> StoreResult<Option<UrlRecord>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.code == code)
            .cloned())
    }

    async fn increment_clicks(&self, code: &str) -> StoreResult<()> {
        self.check_available()?;

        if let Some(record) = self
            .records
            .lock()
            .unwrap()
            .iter_mut()
            .find(|r| r.code == code)
        {
            record.clicks += 1;
        }

        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> StoreResult<Vec<UrlRecord>> {
        self.check_available()?;

        let records = self.records.lock().unwrap().clone();
        Ok(Self::newest_first(records)
            .into_iter()
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn list_by_requester(&self, requester: &str) -> StoreResult<Vec<UrlRecord>> {
        self.check_available()?;

        let records = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.requested_from == requester)
            .cloned()
            .collect();
        Ok(Self::newest_first(records))
    }

    async fn count(&self) -> StoreResult<i64> {
        self.check_available()?;
        Ok(self.records.lock().unwrap().len() as i64)
    }

    async fn total_clicks(&self) -> StoreResult<i64> {
        self.check_available()?;
        Ok(self.records.lock().unwrap().iter().map(|r| r.clicks).sum())
    }

    async fn health_check(&self) -> bool {
        !self.unavailable.load(Ordering::SeqCst)
    }
}

pub struct TestContext {
    pub state: AppState,
    pub repository: Arc<MemoryUrlRepository>,
    pub cache: Arc<BoundedCache>,
    pub clicks: mpsc::Receiver<ClickEvent>,
}

pub fn create_test_state() -> TestContext {
    create_test_state_with_capacity(16)
}

pub fn create_test_state_with_capacity(capacity: usize) -> TestContext {
    let repository = Arc::new(MemoryUrlRepository::new());
    let cache = Arc::new(BoundedCache::new(NonZeroUsize::new(capacity).unwrap()));
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        repository.clone(),
        cache.clone(),
        tx,
        BASE_URL.to_string(),
        2048,
    );

    TestContext {
        state,
        repository,
        cache,
        clicks: rx,
    }
}

/// Injects a fixed client address, standing in for `into_make_service_with_connect_info`.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
