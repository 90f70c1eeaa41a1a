use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use super::analytics::{compute_analytics, SurveyAnalytics};
use super::storage::ResponseStorage;
use super::types::{ResponseMetadata, SubmitResponseInput, SurveyResponse};
use crate::db::DbState;
use crate::pagination::PaginationParams;
use crate::storage::surveys::SurveyStorage;
use crate::storage::{generate_id, StorageError};
use crate::types::{Survey, SurveyStatus};

/// Response service errors
#[derive(Error, Debug)]
pub enum ResponseServiceError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Validation(String),
    #[error("Survey not found: {0}")]
    NotFound(String),
}

pub type ResponseServiceResult<T> = Result<T, ResponseServiceError>;

/// Submitter details captured from the HTTP layer
#[derive(Debug, Clone, Default)]
pub struct SubmitterInfo {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Response service: validated submission against a published survey's
/// question set, paged listing, and analytics aggregation.
pub struct ResponseService {
    surveys: Arc<SurveyStorage>,
    responses: Arc<ResponseStorage>,
}

impl ResponseService {
    pub fn new(db: &DbState) -> Self {
        Self {
            surveys: db.survey_storage.clone(),
            responses: db.response_storage.clone(),
        }
    }

    /// Validates and stores a submission, returning the new response's ID
    pub async fn submit(
        &self,
        input: SubmitResponseInput,
        submitter: SubmitterInfo,
    ) -> ResponseServiceResult<String> {
        let survey_id = input
            .survey_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ResponseServiceError::Validation("Survey ID and answers are required".to_string())
            })?;
        let answers = input.answers.ok_or_else(|| {
            ResponseServiceError::Validation("Survey ID and answers are required".to_string())
        })?;

        let survey = self
            .surveys
            .get_survey(&survey_id)
            .await?
            .ok_or_else(|| ResponseServiceError::NotFound(survey_id.clone()))?;

        if survey.status != SurveyStatus::Published {
            return Err(ResponseServiceError::Validation(
                "Survey is not available for responses".to_string(),
            ));
        }

        // Keep only answers addressing a question the survey currently has
        let question_ids: HashSet<&str> =
            survey.questions.iter().map(|q| q.id.as_str()).collect();
        let valid_answers: Vec<_> = answers
            .into_iter()
            .filter(|a| question_ids.contains(a.question_id.as_str()))
            .collect();

        if valid_answers.is_empty() {
            return Err(ResponseServiceError::Validation(
                "No valid answers provided".to_string(),
            ));
        }

        let submit_time = Utc::now();
        let duration = match input.start_time {
            Some(start) => {
                ((submit_time - start).num_milliseconds() as f64 / 1000.0).round() as i64
            }
            None => 0,
        };

        let response = SurveyResponse {
            id: generate_id(),
            survey_id: survey.id.clone(),
            answers: valid_answers,
            metadata: ResponseMetadata {
                ip: submitter.ip,
                user_agent: submitter.user_agent,
                start_time: input.start_time.unwrap_or(submit_time),
                submit_time,
                duration,
            },
            anonymous: true,
            created_at: submit_time,
            updated_at: submit_time,
        };

        // Two separate writes: the insert and the counter bump are not one
        // transaction. A crash in between leaves an uncounted response.
        self.responses.insert_response(&response).await?;
        self.surveys.increment_response_count(&survey.id).await?;

        info!(
            "Stored response {} for survey {} ({} answers, {}s)",
            response.id,
            survey.id,
            response.answers.len(),
            duration
        );
        Ok(response.id)
    }

    /// Lists a page of a survey's responses with the total count and the
    /// survey itself for context
    pub async fn list_for_survey(
        &self,
        survey_id: &str,
        params: &PaginationParams,
    ) -> ResponseServiceResult<(Vec<SurveyResponse>, i64, Survey)> {
        let survey = self
            .surveys
            .get_survey(survey_id)
            .await?
            .ok_or_else(|| ResponseServiceError::NotFound(survey_id.to_string()))?;

        let (limit, offset) = params.validate();
        let responses = self
            .responses
            .list_by_survey(survey_id, limit, offset)
            .await?;
        let total = self.responses.count_by_survey(survey_id).await?;

        debug!(
            "Retrieved {} of {} responses for survey {}",
            responses.len(),
            total,
            survey_id
        );
        Ok((responses, total, survey))
    }

    /// Aggregates all stored responses for a survey
    pub async fn analytics(&self, survey_id: &str) -> ResponseServiceResult<SurveyAnalytics> {
        let survey = self
            .surveys
            .get_survey(survey_id)
            .await?
            .ok_or_else(|| ResponseServiceError::NotFound(survey_id.to_string()))?;

        let responses = self.responses.list_all_by_survey(survey_id).await?;
        Ok(compute_analytics(&survey, &responses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_helpers::memory_db;
    use crate::manager::SurveyManager;
    use crate::responses::types::{Answer, AnswerValue};
    use crate::types::{QuestionInput, SurveyCreateInput};
    use chrono::Duration;

    async fn published_survey(manager: &SurveyManager, title: &str) -> Survey {
        let input = SurveyCreateInput {
            title: title.to_string(),
            description: "A survey used by response service tests".to_string(),
            category: "feedback".to_string(),
            target_audience: "customers".to_string(),
            questions: Some(vec![
                QuestionInput {
                    id: None,
                    question_type: "rating-scale".to_string(),
                    text: "Rate your satisfaction".to_string(),
                    options: vec![],
                    required: true,
                    order: 0,
                },
                QuestionInput {
                    id: None,
                    question_type: "text".to_string(),
                    text: "Any comments".to_string(),
                    options: vec![],
                    required: false,
                    order: 1,
                },
            ]),
            status: Some("published".to_string()),
            ai_generated: None,
            created_by: None,
        };
        manager.create_survey(input).await.unwrap()
    }

    fn submission(survey: &Survey, value: AnswerValue) -> SubmitResponseInput {
        SubmitResponseInput {
            survey_id: Some(survey.id.clone()),
            answers: Some(vec![Answer {
                question_id: survey.questions[0].id.clone(),
                value,
            }]),
            start_time: None,
        }
    }

    #[tokio::test]
    async fn test_submit_stores_response_and_bumps_counter() {
        let db = memory_db().await;
        let manager = SurveyManager::new(&db);
        let service = ResponseService::new(&db);

        let survey = published_survey(&manager, "Counter Survey").await;

        for _ in 0..3 {
            service
                .submit(
                    submission(&survey, AnswerValue::Number(5.0)),
                    SubmitterInfo::default(),
                )
                .await
                .unwrap();
        }

        let stored = manager.get_survey(&survey.id).await.unwrap().unwrap();
        assert_eq!(stored.response_count, 3);
    }

    #[tokio::test]
    async fn test_submit_rejects_unpublished_survey() {
        let db = memory_db().await;
        let manager = SurveyManager::new(&db);
        let service = ResponseService::new(&db);

        let survey = published_survey(&manager, "Draft Survey").await;
        manager.set_status(&survey.id, "draft").await.unwrap();

        let result = service
            .submit(
                submission(&survey, AnswerValue::Number(5.0)),
                SubmitterInfo::default(),
            )
            .await;
        assert!(matches!(result, Err(ResponseServiceError::Validation(_))));

        // Nothing written, counter untouched
        let stored = manager.get_survey(&survey.id).await.unwrap().unwrap();
        assert_eq!(stored.response_count, 0);
        let (responses, total, _) = service
            .list_for_survey(&survey.id, &PaginationParams::with_page_and_limit(1, 20))
            .await
            .unwrap();
        assert!(responses.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_submit_rejects_when_all_answers_foreign() {
        let db = memory_db().await;
        let manager = SurveyManager::new(&db);
        let service = ResponseService::new(&db);

        let survey = published_survey(&manager, "Foreign Answers").await;

        let input = SubmitResponseInput {
            survey_id: Some(survey.id.clone()),
            answers: Some(vec![Answer {
                question_id: "not-a-question".to_string(),
                value: AnswerValue::Number(1.0),
            }]),
            start_time: None,
        };

        let result = service.submit(input, SubmitterInfo::default()).await;
        assert!(matches!(result, Err(ResponseServiceError::Validation(_))));

        let stored = manager.get_survey(&survey.id).await.unwrap().unwrap();
        assert_eq!(stored.response_count, 0);
    }

    #[tokio::test]
    async fn test_submit_keeps_only_valid_answers() {
        let db = memory_db().await;
        let manager = SurveyManager::new(&db);
        let service = ResponseService::new(&db);

        let survey = published_survey(&manager, "Mixed Answers").await;

        let input = SubmitResponseInput {
            survey_id: Some(survey.id.clone()),
            answers: Some(vec![
                Answer {
                    question_id: survey.questions[0].id.clone(),
                    value: AnswerValue::Number(4.0),
                },
                Answer {
                    question_id: "stale-question".to_string(),
                    value: AnswerValue::Text("dropped".to_string()),
                },
            ]),
            start_time: None,
        };

        service.submit(input, SubmitterInfo::default()).await.unwrap();

        let (responses, total, _) = service
            .list_for_survey(&survey.id, &PaginationParams::with_page_and_limit(1, 20))
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(responses[0].answers.len(), 1);
        assert_eq!(responses[0].answers[0].question_id, survey.questions[0].id);
    }

    #[tokio::test]
    async fn test_submit_missing_survey_is_not_found() {
        let db = memory_db().await;
        let service = ResponseService::new(&db);

        let input = SubmitResponseInput {
            survey_id: Some("missing".to_string()),
            answers: Some(vec![Answer {
                question_id: "q".to_string(),
                value: AnswerValue::Number(1.0),
            }]),
            start_time: None,
        };

        let result = service.submit(input, SubmitterInfo::default()).await;
        assert!(matches!(result, Err(ResponseServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_submit_requires_survey_id_and_answers() {
        let db = memory_db().await;
        let service = ResponseService::new(&db);

        let result = service
            .submit(
                SubmitResponseInput {
                    survey_id: None,
                    answers: None,
                    start_time: None,
                },
                SubmitterInfo::default(),
            )
            .await;
        assert!(matches!(result, Err(ResponseServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_computes_duration_from_start_time() {
        let db = memory_db().await;
        let manager = SurveyManager::new(&db);
        let service = ResponseService::new(&db);

        let survey = published_survey(&manager, "Duration Survey").await;

        let mut input = submission(&survey, AnswerValue::Number(3.0));
        input.start_time = Some(Utc::now() - Duration::seconds(90));
        service.submit(input, SubmitterInfo::default()).await.unwrap();

        let (responses, _, _) = service
            .list_for_survey(&survey.id, &PaginationParams::with_page_and_limit(1, 20))
            .await
            .unwrap();
        // Allow a second of slack for test execution time
        assert!((responses[0].metadata.duration - 90).abs() <= 1);
    }

    #[tokio::test]
    async fn test_cascade_delete_removes_responses() {
        let db = memory_db().await;
        let manager = SurveyManager::new(&db);
        let service = ResponseService::new(&db);

        let survey = published_survey(&manager, "Cascade Survey").await;
        for _ in 0..2 {
            service
                .submit(
                    submission(&survey, AnswerValue::Number(5.0)),
                    SubmitterInfo::default(),
                )
                .await
                .unwrap();
        }

        assert!(manager.delete_survey(&survey.id).await.unwrap());

        let result = service
            .list_for_survey(&survey.id, &PaginationParams::with_page_and_limit(1, 20))
            .await;
        assert!(matches!(result, Err(ResponseServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_analytics_for_missing_survey_is_not_found() {
        let db = memory_db().await;
        let service = ResponseService::new(&db);

        let result = service.analytics("missing").await;
        assert!(matches!(result, Err(ResponseServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_analytics_over_submissions() {
        let db = memory_db().await;
        let manager = SurveyManager::new(&db);
        let service = ResponseService::new(&db);

        let survey = published_survey(&manager, "Analytics Survey").await;
        for value in [4.0, 5.0] {
            service
                .submit(
                    submission(&survey, AnswerValue::Number(value)),
                    SubmitterInfo::default(),
                )
                .await
                .unwrap();
        }

        let analytics = service.analytics(&survey.id).await.unwrap();
        assert_eq!(analytics.total_responses, 2);
        assert_eq!(analytics.question_analytics.len(), 2);
        assert_eq!(analytics.question_analytics[0].average_rating, Some(4.5));
        assert_eq!(analytics.question_analytics[1].response_count, 0);
    }
}
