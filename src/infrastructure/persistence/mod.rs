//! PostgreSQL repository implementations.
//!
//! - [`PgUrlRepository`] - Short link storage, lookup, listing, and click counting

pub mod pg_url_repository;

pub use pg_url_repository::PgUrlRepository;
