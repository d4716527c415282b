use axum::{Json, response::IntoResponse};
use chrono::Utc;
use serde_json::json;

/// Liveness probe
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
