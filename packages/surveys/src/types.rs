use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a survey
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SurveyStatus {
    Draft,
    Published,
    Closed,
}

impl Default for SurveyStatus {
    fn default() -> Self {
        SurveyStatus::Draft
    }
}

impl SurveyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurveyStatus::Draft => "draft",
            SurveyStatus::Published => "published",
            SurveyStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(SurveyStatus::Draft),
            "published" => Some(SurveyStatus::Published),
            "closed" => Some(SurveyStatus::Closed),
            _ => None,
        }
    }
}

impl fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Survey category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SurveyCategory {
    Feedback,
    Research,
    Evaluation,
    Marketing,
    Other,
}

impl SurveyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurveyCategory::Feedback => "feedback",
            SurveyCategory::Research => "research",
            SurveyCategory::Evaluation => "evaluation",
            SurveyCategory::Marketing => "marketing",
            SurveyCategory::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "feedback" => Some(SurveyCategory::Feedback),
            "research" => Some(SurveyCategory::Research),
            "evaluation" => Some(SurveyCategory::Evaluation),
            "marketing" => Some(SurveyCategory::Marketing),
            "other" => Some(SurveyCategory::Other),
            _ => None,
        }
    }
}

impl fmt::Display for SurveyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Audience a survey is aimed at
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TargetAudience {
    Employees,
    Customers,
    Students,
    General,
}

impl TargetAudience {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetAudience::Employees => "employees",
            TargetAudience::Customers => "customers",
            TargetAudience::Students => "students",
            TargetAudience::General => "general",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "employees" => Some(TargetAudience::Employees),
            "customers" => Some(TargetAudience::Customers),
            "students" => Some(TargetAudience::Students),
            "general" => Some(TargetAudience::General),
            _ => None,
        }
    }
}

impl fmt::Display for TargetAudience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The four question kinds, dispatched exhaustively in analytics
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    Text,
    MultipleChoice,
    RatingScale,
    YesNo,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::MultipleChoice => "multiple-choice",
            QuestionType::RatingScale => "rating-scale",
            QuestionType::YesNo => "yes-no",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(QuestionType::Text),
            "multiple-choice" => Some(QuestionType::MultipleChoice),
            "rating-scale" => Some(QuestionType::RatingScale),
            "yes-no" => Some(QuestionType::YesNo),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One prompt within a survey, owned by it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    pub order: u32,
}

/// A survey with its embedded, ordered question list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: SurveyCategory,
    #[serde(rename = "targetAudience")]
    pub target_audience: TargetAudience,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub status: SurveyStatus,
    #[serde(rename = "responseCount")]
    pub response_count: i64,
    #[serde(rename = "aiGenerated")]
    pub ai_generated: bool,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Question as submitted by a client. Enum-like fields stay strings here so
/// bad values surface as validation errors rather than body rejections; the
/// order field is ignored and reassigned from the array position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
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

/// Input for creating a survey
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyCreateInput {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(rename = "targetAudience")]
    pub target_audience: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<QuestionInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "aiGenerated", default, skip_serializing_if = "Option::is_none")]
    pub ai_generated: Option<bool>,
    #[serde(rename = "createdBy", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Input for partially updating a survey. The response counter is
/// deliberately absent: it only moves through the submission increment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyUpdateInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "targetAudience", default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<QuestionInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "aiGenerated", default, skip_serializing_if = "Option::is_none")]
    pub ai_generated: Option<bool>,
    #[serde(rename = "createdBy", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Filter for the survey list. Values stay raw strings so an unknown
/// status or category matches nothing instead of failing the request.
#[derive(Debug, Clone, Default)]
pub struct SurveyListFilter {
    pub status: Option<String>,
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [SurveyStatus::Draft, SurveyStatus::Published, SurveyStatus::Closed] {
            assert_eq!(SurveyStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(SurveyStatus::parse("archived"), None);
    }

    #[test]
    fn test_question_type_wire_names() {
        assert_eq!(QuestionType::MultipleChoice.as_str(), "multiple-choice");
        assert_eq!(QuestionType::parse("rating-scale"), Some(QuestionType::RatingScale));
        assert_eq!(QuestionType::parse("ranking"), None);

        let json = serde_json::to_string(&QuestionType::YesNo).unwrap();
        assert_eq!(json, "\"yes-no\"");
    }

    #[test]
    fn test_survey_serializes_camel_case() {
        let survey = Survey {
            id: "s1".to_string(),
            title: "Employee Survey".to_string(),
            description: "How is everyone doing".to_string(),
            category: SurveyCategory::Feedback,
            target_audience: TargetAudience::Employees,
            questions: vec![],
            status: SurveyStatus::Draft,
            response_count: 0,
            ai_generated: false,
            created_by: "anonymous".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&survey).unwrap();
        assert_eq!(value["targetAudience"], "employees");
        assert_eq!(value["responseCount"], 0);
        assert_eq!(value["aiGenerated"], false);
        assert_eq!(value["createdBy"], "anonymous");
        assert_eq!(value["status"], "draft");
    }
}
