use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use crate::db::DbState;
use crate::pagination::PaginationParams;
use crate::responses::storage::ResponseStorage;
use crate::storage::surveys::{SurveyChanges, SurveyStorage};
use crate::storage::{generate_id, StorageError};
use crate::types::{
    Question, QuestionInput, QuestionType, Survey, SurveyCategory, SurveyCreateInput,
    SurveyListFilter, SurveyStatus, SurveyUpdateInput, TargetAudience,
};
use crate::validator::{validate_survey_create, validate_survey_update, ValidationError};

/// Manager errors
#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Validation errors: {0:?}")]
    Validation(Vec<ValidationError>),
    #[error("Survey not found: {0}")]
    NotFound(String),
}

pub type ManagerResult<T> = Result<T, ManagerError>;

/// Survey service: validation, question renumbering, status transitions,
/// and the delete cascade over the storage layer.
pub struct SurveyManager {
    surveys: Arc<SurveyStorage>,
    responses: Arc<ResponseStorage>,
}

impl SurveyManager {
    pub fn new(db: &DbState) -> Self {
        Self {
            surveys: db.survey_storage.clone(),
            responses: db.response_storage.clone(),
        }
    }

    /// Lists surveys matching the filter, newest first, with the total count
    pub async fn list_surveys(
        &self,
        filter: &SurveyListFilter,
        params: &PaginationParams,
    ) -> ManagerResult<(Vec<Survey>, i64)> {
        let (limit, offset) = params.validate();
        let surveys = self.surveys.list_surveys(filter, limit, offset).await?;
        let total = self.surveys.count_surveys(filter).await?;

        debug!("Retrieved {} of {} surveys", surveys.len(), total);
        Ok((surveys, total))
    }

    /// Gets a survey by ID
    pub async fn get_survey(&self, id: &str) -> ManagerResult<Option<Survey>> {
        Ok(self.surveys.get_survey(id).await?)
    }

    /// Creates a new survey
    pub async fn create_survey(&self, input: SurveyCreateInput) -> ManagerResult<Survey> {
        let validation_errors = validate_survey_create(&input);
        if !validation_errors.is_empty() {
            return Err(ManagerError::Validation(validation_errors));
        }

        let category = parse_category(&input.category)?;
        let target_audience = parse_audience(&input.target_audience)?;
        let status = match input.status {
            Some(ref raw) => parse_status(raw)?,
            None => SurveyStatus::Draft,
        };
        let questions = build_questions(input.questions.unwrap_or_default())?;

        let now = Utc::now();
        let survey = Survey {
            id: generate_id(),
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            category,
            target_audience,
            questions,
            status,
            response_count: 0,
            ai_generated: input.ai_generated.unwrap_or(false),
            created_by: input
                .created_by
                .unwrap_or_else(|| "anonymous".to_string()),
            created_at: now,
            updated_at: now,
        };

        self.surveys.insert_survey(&survey).await?;

        info!("Created survey '{}' with ID {}", survey.title, survey.id);
        Ok(survey)
    }

    /// Applies a partial update to an existing survey
    pub async fn update_survey(
        &self,
        id: &str,
        updates: SurveyUpdateInput,
    ) -> ManagerResult<Survey> {
        let validation_errors = validate_survey_update(&updates);
        if !validation_errors.is_empty() {
            return Err(ManagerError::Validation(validation_errors));
        }

        let changes = SurveyChanges {
            title: updates.title.map(|t| t.trim().to_string()),
            description: updates.description.map(|d| d.trim().to_string()),
            category: updates
                .category
                .map(|c| parse_category(&c))
                .transpose()?,
            target_audience: updates
                .target_audience
                .map(|a| parse_audience(&a))
                .transpose()?,
            questions: updates
                .questions
                .map(build_questions)
                .transpose()?,
            status: updates.status.map(|s| parse_status(&s)).transpose()?,
            ai_generated: updates.ai_generated,
            created_by: updates.created_by,
        };

        let survey = self
            .surveys
            .update_survey(id, changes)
            .await
            .map_err(|e| match e {
                StorageError::NotFound => ManagerError::NotFound(id.to_string()),
                other => ManagerError::Storage(other),
            })?;

        info!("Updated survey '{}' (ID: {})", survey.title, survey.id);
        Ok(survey)
    }

    /// Deletes a survey and every response referencing it
    pub async fn delete_survey(&self, id: &str) -> ManagerResult<bool> {
        if !self.surveys.delete_survey(id).await? {
            return Ok(false);
        }

        let removed = self.responses.delete_by_survey(id).await?;
        info!("Deleted survey {} and {} responses", id, removed);
        Ok(true)
    }

    /// Moves a survey to a new status. Any status may move to any other.
    pub async fn set_status(&self, id: &str, status: &str) -> ManagerResult<Survey> {
        let status = parse_status(status)?;

        let survey = self
            .surveys
            .set_status(id, status)
            .await
            .map_err(|e| match e {
                StorageError::NotFound => ManagerError::NotFound(id.to_string()),
                other => ManagerError::Storage(other),
            })?;

        info!("Survey {} is now {}", survey.id, survey.status);
        Ok(survey)
    }
}

/// Build the stored question list: parse types, trim text, keep supplied
/// ids, mint the rest, and renumber order to the array position regardless
/// of what the caller sent.
fn build_questions(inputs: Vec<QuestionInput>) -> ManagerResult<Vec<Question>> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| {
            let question_type = QuestionType::parse(input.question_type.trim()).ok_or_else(|| {
                ManagerError::Validation(vec![ValidationError::new(
                    format!("questions[{}]", index),
                    "Invalid question type",
                )])
            })?;

            Ok(Question {
                id: input.id.unwrap_or_else(generate_id),
                question_type,
                text: input.text.trim().to_string(),
                options: input
                    .options
                    .into_iter()
                    .map(|o| o.trim().to_string())
                    .collect(),
                required: input.required,
                order: index as u32,
            })
        })
        .collect()
}

fn parse_category(raw: &str) -> ManagerResult<SurveyCategory> {
    SurveyCategory::parse(raw.trim()).ok_or_else(|| {
        ManagerError::Validation(vec![ValidationError::new("category", "Invalid category")])
    })
}

fn parse_audience(raw: &str) -> ManagerResult<TargetAudience> {
    TargetAudience::parse(raw.trim()).ok_or_else(|| {
        ManagerError::Validation(vec![ValidationError::new(
            "targetAudience",
            "Invalid target audience",
        )])
    })
}

fn parse_status(raw: &str) -> ManagerResult<SurveyStatus> {
    SurveyStatus::parse(raw.trim()).ok_or_else(|| {
        ManagerError::Validation(vec![ValidationError::new("status", "Invalid status")])
    })
}
