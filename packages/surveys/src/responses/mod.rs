// ABOUTME: Response domain module
// ABOUTME: Submission validation, storage, and aggregate analytics

pub mod analytics;
pub mod service;
pub mod storage;
pub mod types;

pub use analytics::{compute_analytics, QuestionAnalytics, SurveyAnalytics};
pub use service::{ResponseService, ResponseServiceError, ResponseServiceResult, SubmitterInfo};
pub use storage::ResponseStorage;
pub use types::{Answer, AnswerValue, ResponseMetadata, SubmitResponseInput, SurveyResponse};
