//! HTTP API layer for Survey Portal.
//!
//! Exposes the survey, response, and AI routers over shared application
//! state; every endpoint answers with the `{success, message?, data, error}`
//! envelope from [`response::ApiResponse`].

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use survey_portal_ai::{AiClientConfig, SurveyAiClient};
use survey_portal_surveys::{DbState, ResponseService, SurveyManager};

pub mod ai_handlers;
pub mod response;
pub mod responses_handlers;
pub mod surveys_handlers;

pub use response::{ApiError, ApiResponse};

/// Shared state for all API handlers
#[derive(Clone)]
pub struct AppState {
    pub surveys: Arc<SurveyManager>,
    pub responses: Arc<ResponseService>,
    pub ai: Arc<SurveyAiClient>,
}

impl AppState {
    pub fn new(db: &DbState, ai_config: AiClientConfig) -> Self {
        Self {
            surveys: Arc::new(SurveyManager::new(db)),
            responses: Arc::new(ResponseService::new(db)),
            ai: Arc::new(SurveyAiClient::new(ai_config)),
        }
    }
}

/// Creates the surveys API router
pub fn create_surveys_router() -> Router<AppState> {
    Router::new()
        .route("/", get(surveys_handlers::list_surveys))
        .route("/", post(surveys_handlers::create_survey))
        .route("/{id}", get(surveys_handlers::get_survey))
        .route("/{id}", put(surveys_handlers::update_survey))
        .route("/{id}", delete(surveys_handlers::delete_survey))
        .route("/{id}/status", patch(surveys_handlers::update_survey_status))
}

/// Creates the responses API router
pub fn create_responses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(responses_handlers::submit_response))
        .route(
            "/survey/{survey_id}",
            get(responses_handlers::list_survey_responses),
        )
        .route(
            "/analytics/{survey_id}",
            get(responses_handlers::survey_analytics),
        )
}

/// Creates the AI proxy router
pub fn create_ai_router() -> Router<AppState> {
    Router::new()
        .route("/generate-survey", post(ai_handlers::generate_survey))
        .route("/improve-questions", post(ai_handlers::improve_questions))
        .route("/suggestions", get(ai_handlers::get_suggestions))
        .route("/health", get(ai_handlers::ai_service_health))
}
