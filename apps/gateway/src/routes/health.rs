use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Reports the gateway itself; the backend is not contacted.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "star-gateway"
    }))
}
