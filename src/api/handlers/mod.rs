//! HTTP request handlers for API endpoints.

pub mod health;
pub mod redirect;
pub mod shorten;
pub mod urls;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
pub use urls::{recent_urls_handler, requester_urls_handler};
