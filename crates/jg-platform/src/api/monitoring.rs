//! Monitoring API
//!
//! Liveness and readiness endpoints. No metrics exporters.

use axum::{routing::get, Json, Router};

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "monitoring",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "UP",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe
#[utoipa::path(
    get,
    path = "/ready",
    tag = "monitoring",
    responses((status = 200, description = "Service is ready"))
)]
pub async fn ready() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "READY"
    }))
}

/// Create the monitoring router
pub fn monitoring_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
}
