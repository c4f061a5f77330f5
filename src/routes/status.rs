use axum::Json;
use serde_json::{json, Value};

/// GET / - Liveness check
pub async fn status() -> Json<Value> {
    Json(json!({
        "status": "online",
        "message": "SmartRoute planning service is running",
    }))
}
