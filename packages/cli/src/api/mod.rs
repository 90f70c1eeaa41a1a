use axum::{routing::get, Router};

pub mod health;

use survey_portal_api::{
    create_ai_router, create_responses_router, create_surveys_router, AppState,
};
use survey_portal_surveys::{DbState, StorageError};

use crate::config::Config;
use crate::middleware::{rate_limit, RateLimitConfig, RateLimitLayer};

/// Assemble the full application router over initialized storage
pub async fn create_router(config: &Config) -> Result<Router, StorageError> {
    let db = DbState::init_with_path(config.database_path.clone()).await?;
    let state = AppState::new(&db, config.ai.clone());

    let rate_limit_layer = RateLimitLayer::new(RateLimitConfig::default());

    Ok(Router::new()
        .route("/health", get(health::health_check))
        .route("/api", get(health::api_index))
        .nest("/api/surveys", create_surveys_router())
        .nest("/api/responses", create_responses_router())
        .nest("/api/ai", create_ai_router())
        .with_state(state)
        .layer(axum::middleware::from_fn(rate_limit::rate_limit_middleware))
        .layer(axum::Extension(rate_limit_layer)))
}
