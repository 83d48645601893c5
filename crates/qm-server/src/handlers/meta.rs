use axum::response::Json;
use serde_json::json;

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Service name and version.
pub async fn info() -> Json<serde_json::Value> {
    Json(json!({
        "name": "quartermaster",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
