use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use survey_portal_surveys::{
    PaginationMeta, PaginationParams, Survey, SurveyCreateInput, SurveyListFilter,
    SurveyUpdateInput,
};

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// Query parameters for the survey list
#[derive(Deserialize)]
pub struct SurveyListQuery {
    pub status: Option<String>,
    pub category: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

/// Payload for the survey list endpoint
#[derive(Serialize)]
pub struct SurveyListPayload {
    pub surveys: Vec<Survey>,
    pub pagination: PaginationMeta,
}

/// Request body for a status transition
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// List surveys, optionally filtered by status and category
pub async fn list_surveys(
    State(state): State<AppState>,
    Query(params): Query<SurveyListQuery>,
) -> impl IntoResponse {
    info!(
        "Listing surveys (status: {:?}, category: {:?}, page: {})",
        params.status, params.category, params.page
    );

    let filter = SurveyListFilter {
        status: params.status,
        category: params.category,
    };
    let pagination = PaginationParams::with_page_and_limit(params.page, params.limit);

    match state.surveys.list_surveys(&filter, &pagination).await {
        Ok((surveys, total)) => {
            let payload = SurveyListPayload {
                surveys,
                pagination: PaginationMeta::new(&pagination, total),
            };
            (StatusCode::OK, ResponseJson(ApiResponse::success(payload))).into_response()
        }
        Err(e) => {
            error!("Failed to list surveys: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Get a single survey by ID
pub async fn get_survey(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Getting survey: {}", id);

    match state.surveys.get_survey(&id).await {
        Ok(Some(survey)) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(survey))).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            ResponseJson(ApiResponse::<()>::error("Survey not found".to_string())),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to get survey {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}

/// Create a new survey
pub async fn create_survey(
    State(state): State<AppState>,
    Json(input): Json<SurveyCreateInput>,
) -> impl IntoResponse {
    info!("Creating survey: {}", input.title);

    match state.surveys.create_survey(input).await {
        Ok(survey) => {
            info!("Created survey: {} (ID: {})", survey.title, survey.id);
            (
                StatusCode::CREATED,
                ResponseJson(ApiResponse::success_with_message(
                    "Survey created successfully",
                    survey,
                )),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to create survey: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// Apply a partial update to a survey
pub async fn update_survey(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(updates): Json<SurveyUpdateInput>,
) -> impl IntoResponse {
    info!("Updating survey: {}", id);

    match state.surveys.update_survey(&id, updates).await {
        Ok(survey) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::success_with_message(
                "Survey updated successfully",
                survey,
            )),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to update survey {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}

/// Delete a survey and all of its responses
pub async fn delete_survey(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("Deleting survey: {}", id);

    match state.surveys.delete_survey(&id).await {
        Ok(true) => (
            StatusCode::OK,
            ResponseJson(ApiResponse::<()>::message_only(
                "Survey deleted successfully",
            )),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            ResponseJson(ApiResponse::<()>::error("Survey not found".to_string())),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete survey {}: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}

/// Move a survey to a new lifecycle status
pub async fn update_survey_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    let raw_status = request.status.unwrap_or_default();
    info!("Updating survey {} status to '{}'", id, raw_status);

    match state.surveys.set_status(&id, &raw_status).await {
        Ok(survey) => {
            let message = format!("Survey {} successfully", survey.status);
            (
                StatusCode::OK,
                ResponseJson(ApiResponse::success_with_message(message, survey)),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to update survey {} status: {}", id, e);
            ApiError::from(e).into_response()
        }
    }
}
