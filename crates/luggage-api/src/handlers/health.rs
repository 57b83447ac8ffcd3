use axum::Json;
use serde_json::{json, Value};

/// Liveness probe. Does not touch the model.
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "alive" }))
}
