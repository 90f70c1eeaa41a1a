use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Application-level errors raised by the server's own middleware
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Rate limit exceeded")]
    RateLimitExceeded { retry_after: u64, limit: u32 },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::RateLimitExceeded { retry_after, limit } => {
                warn!(
                    retry_after = %retry_after,
                    limit = %limit,
                    "Rate limit exceeded"
                );

                let body = json!({
                    "success": false,
                    "error": "Too many requests from this IP"
                });

                let mut response =
                    (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
                let headers = response.headers_mut();
                if let Ok(value) = retry_after.to_string().parse() {
                    headers.insert("Retry-After", value);
                }
                if let Ok(value) = limit.to_string().parse() {
                    headers.insert("X-RateLimit-Limit", value);
                }

                response
            }
        }
    }
}
