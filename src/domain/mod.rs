//! Domain layer: entities, store contract, and click accounting.
//!
//! - [`entities`] - Stored record types
//! - [`errors`] - Store failure kinds
//! - [`repositories`] - Persistent store trait
//! - [`click_event`] - Click accounting event model
//! - [`click_worker`] - Asynchronous click processing worker
//!
//! # Click Processing Flow
//!
//! 1. A short code resolves (cache or store hit)
//! 2. [`click_event::ClickEvent`] is pushed onto a bounded channel without waiting
//! 3. [`click_worker::run_click_worker`] applies it with retry
//! 4. The counter is incremented via [`repositories::UrlRepository::increment_clicks`]

pub mod click_event;
pub mod click_worker;
pub mod entities;
pub mod errors;
pub mod repositories;
