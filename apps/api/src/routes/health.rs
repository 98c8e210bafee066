use axum::Json;
use serde_json::{json, Value};

/// GET /
/// Liveness banner.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "F8 JobEase API is running"
    }))
}

/// GET /api/health
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy"
    }))
}
