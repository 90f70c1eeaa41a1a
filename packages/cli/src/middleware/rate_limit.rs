use axum::{extract::Request, middleware::Next, response::Response};
use governor::{
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{
    collections::HashMap,
    num::NonZeroU32,
    sync::{Arc, Mutex},
};
use tracing::debug;

use crate::error::AppError;

/// Type alias for a rate limiter
type RateLimiterType = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Type alias for a rate limiter instance
type RateLimiterInstance = Arc<RateLimiterType>;

/// Type alias for the rate limiter storage
type RateLimiterStorage = Arc<Mutex<HashMap<String, RateLimiterInstance>>>;

/// Rate limiting configuration for different endpoint categories
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub health_rpm: u32,    // Health endpoints
    pub surveys_rpm: u32,   // Survey CRUD
    pub responses_rpm: u32, // Response submission and analytics
    pub ai_rpm: u32,        // AI proxy endpoints
    pub global_rpm: u32,    // Global fallback
    pub burst_size: u32,    // Burst size multiplier
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            health_rpm: 60,
            surveys_rpm: 30,
            responses_rpm: 30,
            ai_rpm: 10, // Strict limit to prevent cost abuse on the AI collaborator
            global_rpm: 30,
            burst_size: 5,
        }
    }
}

/// Rate limiter with per-endpoint-category configuration
#[derive(Clone)]
pub struct RateLimitLayer {
    config: RateLimitConfig,
    limiters: RateLimiterStorage,
}

impl RateLimitLayer {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            limiters: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get rate limit for a specific endpoint category
    fn get_rate_limit_for_path(&self, path: &str) -> u32 {
        match categorize_endpoint(path) {
            EndpointCategory::Health => self.config.health_rpm,
            EndpointCategory::Surveys => self.config.surveys_rpm,
            EndpointCategory::Responses => self.config.responses_rpm,
            EndpointCategory::Ai => self.config.ai_rpm,
            EndpointCategory::Other => self.config.global_rpm,
        }
    }

    /// Get or create the rate limiter for an endpoint category
    fn get_limiter_for_path(&self, path: &str) -> RateLimiterInstance {
        let category = categorize_endpoint(path);
        let rpm = self.get_rate_limit_for_path(path);

        let mut limiters = self.limiters.lock().unwrap();
        let key = format!("{}:{}", category.as_str(), rpm);

        if let Some(limiter) = limiters.get(&key) {
            limiter.clone()
        } else {
            let quota =
                Quota::per_minute(NonZeroU32::new(rpm).unwrap_or(NonZeroU32::new(30).unwrap()))
                    .allow_burst(
                        NonZeroU32::new(rpm * self.config.burst_size / 10)
                            .unwrap_or(NonZeroU32::new(5).unwrap()),
                    );

            let limiter = Arc::new(RateLimiter::direct(quota));
            limiters.insert(key, limiter.clone());

            debug!(
                endpoint_category = %category.as_str(),
                rpm = %rpm,
                "Created rate limiter for endpoint category"
            );

            limiter
        }
    }
}

/// Endpoint categories for different rate limiting rules
#[derive(Debug, Clone, Copy)]
enum EndpointCategory {
    Health,
    Surveys,
    Responses,
    Ai,
    Other,
}

impl EndpointCategory {
    fn as_str(self) -> &'static str {
        match self {
            EndpointCategory::Health => "health",
            EndpointCategory::Surveys => "surveys",
            EndpointCategory::Responses => "responses",
            EndpointCategory::Ai => "ai",
            EndpointCategory::Other => "other",
        }
    }
}

/// Categorize endpoint based on path
fn categorize_endpoint(path: &str) -> EndpointCategory {
    if path.contains("/health") {
        EndpointCategory::Health
    } else if path.contains("/surveys") {
        EndpointCategory::Surveys
    } else if path.contains("/responses") {
        EndpointCategory::Responses
    } else if path.contains("/ai") {
        EndpointCategory::Ai
    } else {
        EndpointCategory::Other
    }
}

/// Per-category rate limiting middleware
pub async fn rate_limit_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    // Extract the rate limit layer from request extensions
    let layer = request
        .extensions()
        .get::<RateLimitLayer>()
        .cloned()
        .unwrap_or_else(|| RateLimitLayer::new(RateLimitConfig::default()));

    if !layer.config.enabled {
        return Ok(next.run(request).await);
    }

    let path = request.uri().path().to_string();
    let limiter = layer.get_limiter_for_path(&path);
    let rate_limit = layer.get_rate_limit_for_path(&path);

    match limiter.check() {
        Ok(_) => Ok(next.run(request).await),
        Err(_) => Err(AppError::RateLimitExceeded {
            retry_after: 60,
            limit: rate_limit,
        }),
    }
}
