//! Click event model for asynchronous click accounting.

/// A successful resolution waiting to be counted.
///
/// Sent from [`crate::application::services::CacheAsideResolver`] over a
/// bounded channel so the redirect never waits on the store write.
/// Processed by [`crate::domain::click_worker::run_click_worker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
}

impl ClickEvent {
    /// Creates a click event for a resolved short code.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
