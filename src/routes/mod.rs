//! HTTP route handlers for the cbcexams catalog API.
//!
//! - `categories`: static education-level taxonomy
//! - `health`: health, readiness, metrics and version endpoints
//! - `resources`: cached resource search and parent-directory listing

use axum::{routing::get, Router};

use crate::state::AppState;

pub mod categories;
pub mod health;
pub mod resources;

/// Builds the application router. Catalog routes answer with and without a
/// trailing slash.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .route("/v1/api/resources", get(resources::get_resources))
        .route("/v1/api/resources/", get(resources::get_resources))
        .route("/v1/api/resources/parent-directories", get(resources::get_parent_directories))
        .route("/v1/api/categories", get(categories::get_categories))
        .route("/v1/api/categories/", get(categories::get_categories))
        .with_state(state)
}
