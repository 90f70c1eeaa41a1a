use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A respondent-supplied answer value. On the wire this is a bare JSON
/// scalar, so the variants are untagged; interpretation (choice key,
/// rating, free text) is driven by the owning question's type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl AnswerValue {
    /// Extract an integer rating from the value. Mirrors JavaScript's
    /// `parseInt`: numbers truncate toward zero, strings contribute their
    /// leading signed-digit prefix, everything else is excluded.
    pub fn as_rating(&self) -> Option<i64> {
        match self {
            AnswerValue::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            AnswerValue::Number(_) => None,
            AnswerValue::Text(s) => parse_leading_int(s),
            AnswerValue::Bool(_) => None,
        }
    }

    /// Key used when tallying option counts, matching JavaScript string
    /// coercion of the raw value.
    pub fn option_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Bool(b) => write!(f, "{}", b),
            AnswerValue::Number(n) => write!(f, "{}", n),
            AnswerValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Parse the leading optionally-signed integer prefix of a string
fn parse_leading_int(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    digits.parse::<i64>().ok().map(|n| sign * n)
}

/// One respondent's value for one question within a response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    #[serde(rename = "questionId")]
    pub question_id: String,
    pub value: AnswerValue,
}

/// Submission metadata captured with each response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(rename = "userAgent", default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "submitTime")]
    pub submit_time: DateTime<Utc>,
    /// Time from form start to submission, in whole seconds
    pub duration: i64,
}

/// One respondent's complete submission against a published survey.
/// Immutable after creation; removed only by survey cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: String,
    #[serde(rename = "surveyId")]
    pub survey_id: String,
    pub answers: Vec<Answer>,
    pub metadata: ResponseMetadata,
    pub anonymous: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Input for submitting a response. surveyId and answers are optional at
/// the serde level so their absence produces the service's own validation
/// error instead of a body rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitResponseInput {
    #[serde(rename = "surveyId", default, skip_serializing_if = "Option::is_none")]
    pub survey_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<Answer>>,
    #[serde(rename = "startTime", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
}
