//! Axum-based HTTP server hosting the analysis page.
//!
//! This module sets up the HTTP server, its routes and middleware. The page
//! itself is rendered server-side; the browser posts the upload form back to
//! `/analyze` and receives the re-rendered page.
//!
//! # Components
//!
//! - `handlers`: Page, analysis, health and metrics endpoints.
//! - `middleware`: Request ID tracking and upload size limits.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{HealthResponse, HealthStatus};
pub use routes::{create_router, AppState};
