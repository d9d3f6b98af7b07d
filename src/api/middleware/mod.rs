//! HTTP middleware.
//!
//! - [`tracing`] - Request/response spans and latency logging

pub mod tracing;
