//! Core domain entities.
//!
//! - [`UrlRecord`] - A stored short code mapping with creation metadata and click count
//! - [`NewUrlRecord`] - Input for creating a record

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlRecord};
