use serde::{Deserialize, Serialize};

/// Request to draft a survey's questions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSurveyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "targetAudience", default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(rename = "numberOfQuestions", default = "default_number_of_questions")]
    pub number_of_questions: u32,
    #[serde(rename = "questionTypes", default = "default_question_types")]
    pub question_types: Vec<String>,
}

pub(crate) fn default_number_of_questions() -> u32 {
    8
}

pub(crate) fn default_question_types() -> Vec<String> {
    vec![
        "multiple-choice".to_string(),
        "text".to_string(),
        "rating-scale".to_string(),
    ]
}

/// Request to revise existing questions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImproveQuestionsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<serde_json::Value>>,
    #[serde(rename = "improvementGoals", default = "default_improvement_goals")]
    pub improvement_goals: Vec<String>,
}

pub(crate) fn default_improvement_goals() -> Vec<String> {
    vec!["clarity".to_string()]
}

/// A question drafted by the AI service. Passed through to the client
/// verbatim; validation happens when the survey is actually saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    #[serde(rename = "type")]
    pub question_type: String,
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub order: u32,
}

/// One revised question from an improvement request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovedQuestion {
    pub original: String,
    pub improved: String,
    #[serde(rename = "type")]
    pub question_type: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// A survey suggestion for a category/audience
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    #[serde(rename = "keyAreas", default)]
    pub key_areas: Vec<String>,
    #[serde(rename = "expectedInsights", default)]
    pub expected_insights: Vec<String>,
    #[serde(rename = "recommendedQuestions", default)]
    pub recommended_questions: u32,
}

/// Upstream envelope for question generation
#[derive(Debug, Deserialize)]
pub(crate) struct GenerateQuestionsResponse {
    pub success: bool,
    #[serde(default)]
    pub questions: Vec<GeneratedQuestion>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Upstream envelope for question improvement
#[derive(Debug, Deserialize)]
pub(crate) struct ImproveQuestionsResponse {
    pub success: bool,
    #[serde(rename = "improvedQuestions", default)]
    pub improved_questions: Vec<ImprovedQuestion>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Upstream envelope for survey suggestions
#[derive(Debug, Deserialize)]
pub(crate) struct SuggestionsResponse {
    pub success: bool,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    #[serde(default)]
    pub message: Option<String>,
}
