//! HTTP adapters - REST API implementations.
//!
//! Each use-case family has its own HTTP adapter for endpoint exposure.

pub mod catalog;
pub mod error;
pub mod training;

pub use catalog::{catalog_routes, CatalogHandlers};
pub use training::{training_routes, TrainingHandlers};

use axum::{routing::get, Json, Router};

/// Assembles the full API router.
pub fn api_router(catalog: CatalogHandlers, training: TrainingHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/stages", catalog_routes(catalog))
        .nest("/api/training", training_routes(training))
}

/// GET /health - liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
