//! Background worker that applies click events to the store.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;

/// Retries after the first failed increment.
const MAX_RETRIES: usize = 2;

/// Drains click events and increments the matching counters.
///
/// Failures are retried a few times with exponential backoff, then logged and
/// dropped. Nothing is reported back to the resolution that produced the
/// event. Returns once every sender has been dropped and the queue is empty.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<dyn UrlRepository>,
) {
    info!("Click worker started");

    while let Some(event) = rx.recv().await {
        record_click(repository.as_ref(), &event).await;
    }

    info!("Click worker stopped");
}

async fn record_click(repository: &dyn UrlRepository, event: &ClickEvent) {
    let strategy = ExponentialBackoff::from_millis(10)
        .map(jitter)
        .take(MAX_RETRIES);

    match Retry::spawn(strategy, || repository.increment_clicks(&event.code)).await {
        Ok(()) => debug!("Click recorded for {}", event.code),
        Err(e) => {
            metrics::counter!("clicks_failed_total").increment(1);
            error!("Failed to record click for {}: {}", event.code, e);
        }
    }
}
