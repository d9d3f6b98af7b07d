//! Application layer services.
//!
//! Services coordinate the cache, the persistent store, and the short code
//! generator. They depend only on the [`crate::infrastructure::cache::Cache`]
//! and [`crate::domain::repositories::UrlRepository`] traits, never on a
//! concrete backend.
//!
//! # Available Services
//!
//! - [`services::resolver::CacheAsideResolver`] - Short code lookup with cache-aside fallback
//! - [`services::link_service::LinkService`] - Short link creation and listing

pub mod services;
