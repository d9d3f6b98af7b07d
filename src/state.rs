use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{CacheAsideResolver, LinkService};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::Cache;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<CacheAsideResolver>,
    pub link_service: Arc<LinkService>,
    pub repository: Arc<dyn UrlRepository>,
    pub cache: Arc<dyn Cache>,
    pub click_sender: mpsc::Sender<ClickEvent>,
}

impl AppState {
    /// Wires the services around one repository, one cache, and the click queue.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn Cache>,
        click_sender: mpsc::Sender<ClickEvent>,
        base_url: String,
        max_url_length: usize,
    ) -> Self {
        let resolver = Arc::new(CacheAsideResolver::new(
            repository.clone(),
            cache.clone(),
            click_sender.clone(),
        ));
        let link_service = Arc::new(LinkService::new(
            repository.clone(),
            cache.clone(),
            base_url,
            max_url_length,
        ));

        Self {
            resolver,
            link_service,
            repository,
            cache,
            click_sender,
        }
    }
}
