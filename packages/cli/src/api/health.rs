use axum::{response::Result, Json};
use serde_json::{json, Value};
use std::env;

pub async fn health_check() -> Result<Json<Value>> {
    Ok(Json(json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        "version": env!("CARGO_PKG_VERSION")
    })))
}

pub async fn api_index() -> Result<Json<Value>> {
    Ok(Json(json!({
        "message": "🚀 Survey Portal API is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "surveys": "/api/surveys",
            "ai": "/api/ai",
            "responses": "/api/responses"
        }
    })))
}
