//! readme_stats - Embeddable GitHub stats cards
//!
//! Fetches a user's profile and repositories through TTL caches and renders
//! them as an SVG card. Finished cards are captured and cached per query.

pub mod api;
pub mod cache;
pub mod capture;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod render;

pub use api::{create_router, AppState};
pub use config::{Config, StatusPolicy};
pub use error::FetchError;
