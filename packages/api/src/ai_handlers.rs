use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use survey_portal_ai::{
    GenerateSurveyRequest, GeneratedQuestion, ImproveQuestionsRequest, ImprovedQuestion,
    Suggestion,
};

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// An unsaved survey draft assembled from AI-generated questions. The
/// client reviews it and saves it through the normal create endpoint.
#[derive(Serialize)]
pub struct SurveyDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "targetAudience")]
    pub target_audience: String,
    pub questions: Vec<GeneratedQuestion>,
    #[serde(rename = "aiGenerated")]
    pub ai_generated: bool,
}

#[derive(Serialize)]
pub struct SurveyDraftPayload {
    pub survey: SurveyDraft,
}

#[derive(Serialize)]
pub struct ImprovedQuestionsPayload {
    #[serde(rename = "improvedQuestions")]
    pub improved_questions: Vec<ImprovedQuestion>,
}

#[derive(Serialize)]
pub struct SuggestionsPayload {
    pub suggestions: Vec<Suggestion>,
}

#[derive(Serialize)]
pub struct AiHealthPayload {
    #[serde(rename = "aiServiceStatus")]
    pub ai_service_status: serde_json::Value,
}

/// Query parameters for survey suggestions
#[derive(Deserialize)]
pub struct SuggestionsQuery {
    pub category: Option<String>,
    #[serde(rename = "targetAudience")]
    pub target_audience: Option<String>,
}

/// Draft a survey with the AI service
pub async fn generate_survey(
    State(state): State<AppState>,
    Json(request): Json<GenerateSurveyRequest>,
) -> impl IntoResponse {
    info!("Generating survey via AI service");

    match state.ai.generate_survey(&request).await {
        Ok(questions) => {
            info!("AI service returned {} questions", questions.len());
            let draft = SurveyDraft {
                title: request.title.unwrap_or_default(),
                description: request.description.unwrap_or_default(),
                category: request.category.unwrap_or_default(),
                target_audience: request.target_audience.unwrap_or_default(),
                questions,
                ai_generated: true,
            };
            (
                StatusCode::OK,
                ResponseJson(ApiResponse::success_with_message(
                    "Survey generated successfully",
                    SurveyDraftPayload { survey: draft },
                )),
            )
                .into_response()
        }
        Err(e) => {
            error!("AI survey generation failed: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Revise existing questions with the AI service
pub async fn improve_questions(
    State(state): State<AppState>,
    Json(request): Json<ImproveQuestionsRequest>,
) -> impl IntoResponse {
    info!("Improving questions via AI service");

    match state.ai.improve_questions(&request).await {
        Ok(improved_questions) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success_with_message(
                "Questions improved successfully",
                ImprovedQuestionsPayload { improved_questions },
            )),
        )
            .into_response(),
        Err(e) => {
            error!("AI question improvement failed: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Fetch survey suggestions for a category
pub async fn get_suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionsQuery>,
) -> impl IntoResponse {
    let category = match params.category {
        Some(ref category) if !category.is_empty() => category.as_str(),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                ResponseJson(ApiResponse::<()>::error(
                    "Category parameter is required".to_string(),
                )),
            )
                .into_response()
        }
    };

    info!("Fetching AI suggestions for category '{}'", category);

    match state
        .ai
        .suggestions(category, params.target_audience.as_deref())
        .await
    {
        Ok(suggestions) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(SuggestionsPayload { suggestions })),
        )
            .into_response(),
        Err(e) => {
            error!("AI suggestions request failed: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Report the AI collaborator's liveness
pub async fn ai_service_health(State(state): State<AppState>) -> impl IntoResponse {
    match state.ai.health().await {
        Ok(status) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success(AiHealthPayload {
                ai_service_status: status,
            })),
        )
            .into_response(),
        Err(e) => {
            warn!("AI service health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ResponseJson(ApiResponse::<()>::error(
                    "AI service is unavailable".to_string(),
                )),
            )
                .into_response()
        }
    }
}
