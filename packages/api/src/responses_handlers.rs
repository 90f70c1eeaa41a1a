use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json as ResponseJson},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use survey_portal_surveys::{
    PaginationMeta, PaginationParams, SubmitResponseInput, SubmitterInfo, SurveyResponse,
};

use crate::response::{ApiError, ApiResponse};
use crate::AppState;

/// Query parameters for the response list
#[derive(Deserialize)]
pub struct ResponseListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

/// Payload returned after a successful submission
#[derive(Serialize)]
pub struct SubmitResponsePayload {
    #[serde(rename = "responseId")]
    pub response_id: String,
}

/// Survey context included with a response list
#[derive(Serialize)]
pub struct ResponseSurveyContext {
    pub id: String,
    pub title: String,
    #[serde(rename = "totalQuestions")]
    pub total_questions: usize,
}

/// Payload for the response list endpoint
#[derive(Serialize)]
pub struct ResponseListPayload {
    pub responses: Vec<SurveyResponse>,
    pub survey: ResponseSurveyContext,
    pub pagination: PaginationMeta,
}

/// Submit a response to a published survey
pub async fn submit_response(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<SubmitResponseInput>,
) -> impl IntoResponse {
    info!("Submitting response for survey {:?}", input.survey_id);

    let submitter = SubmitterInfo {
        ip: header_value(&headers, "x-forwarded-for")
            .map(|raw| raw.split(',').next().unwrap_or(raw).trim().to_string()),
        user_agent: header_value(&headers, header::USER_AGENT.as_str()).map(str::to_string),
    };

    match state.responses.submit(input, submitter).await {
        Ok(response_id) => {
            info!("Stored response {}", response_id);
            (
                StatusCode::CREATED,
                ResponseJson(ApiResponse::success_with_message(
                    "Response submitted successfully",
                    SubmitResponsePayload { response_id },
                )),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to submit response: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

/// List a survey's responses, newest first
pub async fn list_survey_responses(
    State(state): State<AppState>,
    Path(survey_id): Path<String>,
    Query(params): Query<ResponseListQuery>,
) -> impl IntoResponse {
    info!("Listing responses for survey {}", survey_id);

    let pagination = PaginationParams::with_page_and_limit(params.page, params.limit);

    match state
        .responses
        .list_for_survey(&survey_id, &pagination)
        .await
    {
        Ok((responses, total, survey)) => {
            let payload = ResponseListPayload {
                responses,
                survey: ResponseSurveyContext {
                    id: survey.id,
                    title: survey.title,
                    total_questions: survey.questions.len(),
                },
                pagination: PaginationMeta::new(&pagination, total),
            };
            (StatusCode::OK, ResponseJson(ApiResponse::success(payload))).into_response()
        }
        Err(e) => {
            error!("Failed to list responses for {}: {}", survey_id, e);
            ApiError::from(e).into_response()
        }
    }
}

/// Aggregate analytics for a survey's responses
pub async fn survey_analytics(
    State(state): State<AppState>,
    Path(survey_id): Path<String>,
) -> impl IntoResponse {
    info!("Computing analytics for survey {}", survey_id);

    match state.responses.analytics(&survey_id).await {
        Ok(analytics) => {
            (StatusCode::OK, ResponseJson(ApiResponse::success(analytics))).into_response()
        }
        Err(e) => {
            error!("Failed to compute analytics for {}: {}", survey_id, e);
            ApiError::from(e).into_response()
        }
    }
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
