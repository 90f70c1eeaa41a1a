// ABOUTME: HTTP client for the external AI survey generation microservice
// ABOUTME: Fixed per-operation timeouts, local validation, pass-through error mapping

use reqwest::Client;
use serde::Serialize;
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::types::{
    GenerateQuestionsResponse, GenerateSurveyRequest, GeneratedQuestion,
    ImproveQuestionsRequest, ImproveQuestionsResponse, ImprovedQuestion, Suggestion,
    SuggestionsResponse,
};

const DEFAULT_BASE_URL: &str = "http://localhost:5001";
const DEFAULT_GENERATE_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_IMPROVE_TIMEOUT_MS: u64 = 30_000;
const DEFAULT_SUGGESTIONS_TIMEOUT_MS: u64 = 15_000;
const DEFAULT_HEALTH_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Error)]
pub enum AiClientError {
    #[error("{0}")]
    Validation(String),

    #[error("AI service is currently unavailable")]
    ServiceUnavailable,

    #[error("AI request failed: {0}")]
    RequestFailed(String),
}

pub type AiClientResult<T> = Result<T, AiClientError>;

/// AI client configuration, passed in explicitly at construction
#[derive(Debug, Clone)]
pub struct AiClientConfig {
    pub base_url: String,
    pub generate_timeout: Duration,
    pub improve_timeout: Duration,
    pub suggestions_timeout: Duration,
    pub health_timeout: Duration,
}

impl Default for AiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            generate_timeout: Duration::from_millis(DEFAULT_GENERATE_TIMEOUT_MS),
            improve_timeout: Duration::from_millis(DEFAULT_IMPROVE_TIMEOUT_MS),
            suggestions_timeout: Duration::from_millis(DEFAULT_SUGGESTIONS_TIMEOUT_MS),
            health_timeout: Duration::from_millis(DEFAULT_HEALTH_TIMEOUT_MS),
        }
    }
}

impl AiClientConfig {
    /// Read the configuration from environment variables, falling back to
    /// the defaults for anything unset or unparseable
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("AI_SERVICE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            generate_timeout: timeout_from_env(
                "AI_GENERATE_TIMEOUT_MS",
                DEFAULT_GENERATE_TIMEOUT_MS,
            ),
            improve_timeout: timeout_from_env("AI_IMPROVE_TIMEOUT_MS", DEFAULT_IMPROVE_TIMEOUT_MS),
            suggestions_timeout: timeout_from_env(
                "AI_SUGGESTIONS_TIMEOUT_MS",
                DEFAULT_SUGGESTIONS_TIMEOUT_MS,
            ),
            health_timeout: timeout_from_env("AI_HEALTH_TIMEOUT_MS", DEFAULT_HEALTH_TIMEOUT_MS),
        }
    }
}

fn timeout_from_env(var: &str, default_ms: u64) -> Duration {
    let ms = env::var(var)
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}

#[derive(Serialize)]
struct GeneratePayload<'a> {
    title: &'a str,
    description: &'a str,
    category: &'a str,
    #[serde(rename = "targetAudience")]
    target_audience: &'a str,
    #[serde(rename = "numberOfQuestions")]
    number_of_questions: u32,
    #[serde(rename = "questionTypes")]
    question_types: &'a [String],
}

#[derive(Serialize)]
struct ImprovePayload<'a> {
    questions: &'a [serde_json::Value],
    #[serde(rename = "improvementGoals")]
    improvement_goals: &'a [String],
}

/// Client for the AI survey generation microservice
pub struct SurveyAiClient {
    client: Client,
    config: AiClientConfig,
}

impl SurveyAiClient {
    pub fn new(config: AiClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Ask the AI service to draft a question list. Rejects bad input
    /// locally before any network traffic.
    pub async fn generate_survey(
        &self,
        request: &GenerateSurveyRequest,
    ) -> AiClientResult<Vec<GeneratedQuestion>> {
        let title = required_field(&request.title)?;
        let description = required_field(&request.description)?;
        let category = required_field(&request.category)?;
        let target_audience = required_field(&request.target_audience)?;

        if !(5..=15).contains(&request.number_of_questions) {
            return Err(AiClientError::Validation(
                "Number of questions must be between 5 and 15".to_string(),
            ));
        }

        info!(
            "Requesting {} questions from AI service for '{}'",
            request.number_of_questions, title
        );

        let payload = GeneratePayload {
            title,
            description,
            category,
            target_audience,
            number_of_questions: request.number_of_questions,
            question_types: &request.question_types,
        };

        let response = self
            .client
            .post(format!("{}/generate-survey", self.config.base_url))
            .timeout(self.config.generate_timeout)
            .json(&payload)
            .send()
            .await
            .map_err(map_request_error)?;

        let envelope: GenerateQuestionsResponse = parse_envelope(response).await?;
        if !envelope.success {
            return Err(upstream_failure(envelope.message));
        }

        Ok(envelope.questions)
    }

    /// Ask the AI service to revise a set of questions
    pub async fn improve_questions(
        &self,
        request: &ImproveQuestionsRequest,
    ) -> AiClientResult<Vec<ImprovedQuestion>> {
        let questions = match request.questions {
            Some(ref questions) if !questions.is_empty() => questions,
            _ => {
                return Err(AiClientError::Validation(
                    "Questions array is required".to_string(),
                ))
            }
        };

        let payload = ImprovePayload {
            questions,
            improvement_goals: &request.improvement_goals,
        };

        let response = self
            .client
            .post(format!("{}/improve-questions", self.config.base_url))
            .timeout(self.config.improve_timeout)
            .json(&payload)
            .send()
            .await
            .map_err(map_request_error)?;

        let envelope: ImproveQuestionsResponse = parse_envelope(response).await?;
        if !envelope.success {
            return Err(upstream_failure(envelope.message));
        }

        Ok(envelope.improved_questions)
    }

    /// Fetch survey suggestions for a category
    pub async fn suggestions(
        &self,
        category: &str,
        target_audience: Option<&str>,
    ) -> AiClientResult<Vec<Suggestion>> {
        let mut params = vec![("category", category)];
        if let Some(audience) = target_audience {
            params.push(("targetAudience", audience));
        }

        let response = self
            .client
            .get(format!("{}/suggestions", self.config.base_url))
            .timeout(self.config.suggestions_timeout)
            .query(&params)
            .send()
            .await
            .map_err(map_request_error)?;

        let envelope: SuggestionsResponse = parse_envelope(response).await?;
        if !envelope.success {
            return Err(upstream_failure(envelope.message));
        }

        Ok(envelope.suggestions)
    }

    /// Check the AI service's own health endpoint, passing its status
    /// document through untouched
    pub async fn health(&self) -> AiClientResult<serde_json::Value> {
        let response = self
            .client
            .get(format!("{}/health", self.config.base_url))
            .timeout(self.config.health_timeout)
            .send()
            .await
            .map_err(map_request_error)?;

        if !response.status().is_success() {
            warn!("AI service health check returned {}", response.status());
            return Err(AiClientError::RequestFailed(format!(
                "health check returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AiClientError::RequestFailed(e.to_string()))
    }
}

/// Connection-refused-class failures are surfaced distinctly from every
/// other failure, including timeouts.
fn map_request_error(error: reqwest::Error) -> AiClientError {
    if error.is_connect() {
        AiClientError::ServiceUnavailable
    } else {
        AiClientError::RequestFailed(error.to_string())
    }
}

async fn parse_envelope<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> AiClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        // The upstream error body may still carry a message worth relaying
        if let Ok(body) = response.json::<serde_json::Value>().await {
            if let Some(message) = body.get("message").and_then(|m| m.as_str()) {
                return Err(AiClientError::RequestFailed(message.to_string()));
            }
        }
        return Err(AiClientError::RequestFailed(format!(
            "AI service returned {}",
            status
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| AiClientError::RequestFailed(e.to_string()))
}

fn upstream_failure(message: Option<String>) -> AiClientError {
    AiClientError::RequestFailed(message.unwrap_or_else(|| "AI service failed".to_string()))
}

fn required_field(field: &Option<String>) -> Result<&str, AiClientError> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            AiClientError::Validation("All required fields must be provided".to_string())
        })
}
