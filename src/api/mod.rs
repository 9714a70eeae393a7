//! API Module
//!
//! HTTP handlers and routing for the card server.
//!
//! # Endpoints
//! - `GET /api`, `GET /api/*` - Render a stats card as SVG
//! - `GET /` - Plain-text status line
//! - `GET /stats` - Demo page with example cards
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
