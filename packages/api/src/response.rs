// ABOUTME: Shared API response types and error handling
// ABOUTME: Provides the consistent JSON envelope across all API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson},
};
use serde::Serialize;

use survey_portal_ai::AiClientError;
use survey_portal_surveys::{ManagerError, ResponseServiceError};

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            message: None,
            data: Some(data),
            error: None,
        }
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    pub fn message_only(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            message: None,
            data: None,
            error: Some(message),
        }
    }
}

/// Wrapper over the service-layer errors so they can be converted to HTTP
/// responses at this boundary
#[derive(Debug)]
pub enum ApiError {
    Manager(ManagerError),
    ResponseService(ResponseServiceError),
    Ai(AiClientError),
}

impl From<ManagerError> for ApiError {
    fn from(error: ManagerError) -> Self {
        ApiError::Manager(error)
    }
}

impl From<ResponseServiceError> for ApiError {
    fn from(error: ResponseServiceError) -> Self {
        ApiError::ResponseService(error)
    }
}

impl From<AiClientError> for ApiError {
    fn from(error: AiClientError) -> Self {
        ApiError::Ai(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            ApiError::Manager(ManagerError::Validation(errors)) => (
                StatusCode::BAD_REQUEST,
                errors
                    .first()
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            ),
            ApiError::Manager(ManagerError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Survey not found".to_string())
            }
            ApiError::Manager(ManagerError::Storage(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage error".to_string(),
            ),
            ApiError::ResponseService(ResponseServiceError::Validation(message)) => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            ApiError::ResponseService(ResponseServiceError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Survey not found".to_string())
            }
            ApiError::ResponseService(ResponseServiceError::Storage(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage error".to_string(),
            ),
            ApiError::Ai(AiClientError::Validation(message)) => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            ApiError::Ai(AiClientError::ServiceUnavailable) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "AI service is currently unavailable. Please try again later.".to_string(),
            ),
            ApiError::Ai(AiClientError::RequestFailed(message)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            }
        };

        (status, ResponseJson(ApiResponse::<()>::error(message))).into_response()
    }
}
