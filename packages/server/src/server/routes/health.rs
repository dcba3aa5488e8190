use axum::Json;
use serde_json::{json, Value};

/// Liveness probe
pub async fn hello_handler() -> Json<Value> {
    Json(json!({ "message": "Hello from the Chatterbox API" }))
}

/// Status probe
pub async fn status_handler() -> Json<Value> {
    Json(json!({ "status": "Server is up and running" }))
}
