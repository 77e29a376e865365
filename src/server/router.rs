//! Routes shared by every deployment regardless of the registered entities

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Name reported by the health routes
pub const SERVICE_NAME: &str = "biztime";

/// Build health check routes
///
/// - GET /health
/// - GET /healthz
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}
