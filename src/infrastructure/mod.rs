//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`cache`] - Cache backends (bounded in-process map and Redis)
//! - [`persistence`] - PostgreSQL repository implementation

pub mod cache;
pub mod persistence;
