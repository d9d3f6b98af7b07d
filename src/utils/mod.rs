//! Utility functions for code generation, URL validation, and store errors.
//!
//! - [`code_generator`] - Deterministic short code derivation
//! - [`url_validator`] - Destination URL validation
//! - [`db_error`] - `sqlx` error classification

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
