use crate::types::{
    QuestionInput, QuestionType, SurveyCategory, SurveyCreateInput, SurveyStatus,
    SurveyUpdateInput, TargetAudience,
};

/// Validation errors for survey data
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validates survey data for creation
pub fn validate_survey_create(data: &SurveyCreateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let title = data.title.trim();
    if title.len() < 3 {
        errors.push(ValidationError::new(
            "title",
            "Title must be at least 3 characters long",
        ));
    } else if title.len() > 200 {
        errors.push(ValidationError::new(
            "title",
            "Title cannot exceed 200 characters",
        ));
    }

    let description = data.description.trim();
    if description.len() < 10 {
        errors.push(ValidationError::new(
            "description",
            "Description must be at least 10 characters long",
        ));
    } else if description.len() > 1000 {
        errors.push(ValidationError::new(
            "description",
            "Description cannot exceed 1000 characters",
        ));
    }

    if SurveyCategory::parse(data.category.trim()).is_none() {
        errors.push(ValidationError::new("category", "Invalid category"));
    }

    if TargetAudience::parse(data.target_audience.trim()).is_none() {
        errors.push(ValidationError::new(
            "targetAudience",
            "Invalid target audience",
        ));
    }

    if let Some(ref status) = data.status {
        if SurveyStatus::parse(status.trim()).is_none() {
            errors.push(ValidationError::new("status", "Invalid status"));
        }
    }

    if let Some(ref questions) = data.questions {
        validate_questions(questions, &mut errors);
    }

    errors
}

/// Validates survey update data. Only schema-level constraints apply here
/// (presence, lengths, known enum values); the stricter minimum lengths are
/// creation-time checks.
pub fn validate_survey_update(data: &SurveyUpdateInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(ref title) = data.title {
        let title = title.trim();
        if title.is_empty() {
            errors.push(ValidationError::new("title", "Title cannot be empty"));
        } else if title.len() > 200 {
            errors.push(ValidationError::new(
                "title",
                "Title cannot exceed 200 characters",
            ));
        }
    }

    if let Some(ref description) = data.description {
        let description = description.trim();
        if description.is_empty() {
            errors.push(ValidationError::new(
                "description",
                "Description cannot be empty",
            ));
        } else if description.len() > 1000 {
            errors.push(ValidationError::new(
                "description",
                "Description cannot exceed 1000 characters",
            ));
        }
    }

    if let Some(ref category) = data.category {
        if SurveyCategory::parse(category.trim()).is_none() {
            errors.push(ValidationError::new("category", "Invalid category"));
        }
    }

    if let Some(ref target_audience) = data.target_audience {
        if TargetAudience::parse(target_audience.trim()).is_none() {
            errors.push(ValidationError::new(
                "targetAudience",
                "Invalid target audience",
            ));
        }
    }

    if let Some(ref status) = data.status {
        if SurveyStatus::parse(status.trim()).is_none() {
            errors.push(ValidationError::new("status", "Invalid status"));
        }
    }

    if let Some(ref questions) = data.questions {
        validate_questions(questions, &mut errors);
    }

    errors
}

fn validate_questions(questions: &[QuestionInput], errors: &mut Vec<ValidationError>) {
    for (index, question) in questions.iter().enumerate() {
        let field = format!("questions[{}]", index);

        if QuestionType::parse(question.question_type.trim()).is_none() {
            errors.push(ValidationError::new(&field, "Invalid question type"));
        }

        let text = question.text.trim();
        if text.is_empty() {
            errors.push(ValidationError::new(&field, "Question text is required"));
        } else if text.len() > 500 {
            errors.push(ValidationError::new(
                &field,
                "Question text cannot exceed 500 characters",
            ));
        }
    }
}
