// ABOUTME: AI generation service client
// ABOUTME: Request/response contract for the external survey-drafting microservice

pub mod client;
pub mod types;

pub use client::{AiClientConfig, AiClientError, AiClientResult, SurveyAiClient};
pub use types::{
    GenerateSurveyRequest, GeneratedQuestion, ImproveQuestionsRequest, ImprovedQuestion,
    Suggestion,
};
