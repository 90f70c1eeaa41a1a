use serde::Serialize;
use std::collections::BTreeMap;

use super::types::{AnswerValue, SurveyResponse};
use crate::types::{QuestionType, Survey};

/// Aggregate analytics for one survey
#[derive(Debug, Clone, Serialize)]
pub struct SurveyAnalytics {
    #[serde(rename = "totalResponses")]
    pub total_responses: i64,
    /// Mean submission duration in whole seconds
    #[serde(rename = "averageDuration")]
    pub average_duration: i64,
    /// Responses per calendar day, keyed YYYY-MM-DD (UTC)
    #[serde(rename = "responsesByDay")]
    pub responses_by_day: BTreeMap<String, i64>,
    #[serde(rename = "questionAnalytics")]
    pub question_analytics: Vec<QuestionAnalytics>,
}

/// Per-question breakdown, in the survey's question order
#[derive(Debug, Clone, Serialize)]
pub struct QuestionAnalytics {
    #[serde(rename = "questionId")]
    pub question_id: String,
    #[serde(rename = "questionText")]
    pub question_text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(rename = "responseCount")]
    pub response_count: i64,
    /// The raw answer values, one per responding submission
    pub responses: Vec<AnswerValue>,
    /// Occurrence count per distinct value; multiple-choice only
    #[serde(rename = "optionCounts", skip_serializing_if = "Option::is_none")]
    pub option_counts: Option<BTreeMap<String, i64>>,
    /// Mean of integer-parseable values, one decimal; rating-scale only
    #[serde(rename = "averageRating", skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

/// Aggregate a survey's stored responses into its analytics payload
pub fn compute_analytics(survey: &Survey, responses: &[SurveyResponse]) -> SurveyAnalytics {
    let total_responses = responses.len() as i64;

    let average_duration = if responses.is_empty() {
        0
    } else {
        let total: i64 = responses.iter().map(|r| r.metadata.duration).sum();
        (total as f64 / responses.len() as f64).round() as i64
    };

    let mut responses_by_day: BTreeMap<String, i64> = BTreeMap::new();
    for response in responses {
        let day = response.created_at.format("%Y-%m-%d").to_string();
        *responses_by_day.entry(day).or_insert(0) += 1;
    }

    let question_analytics = survey
        .questions
        .iter()
        .map(|question| {
            // First matching answer per submission, like the form collects
            let values: Vec<AnswerValue> = responses
                .iter()
                .filter_map(|r| {
                    r.answers
                        .iter()
                        .find(|a| a.question_id == question.id)
                        .map(|a| a.value.clone())
                })
                .collect();

            let (option_counts, average_rating) = match question.question_type {
                QuestionType::MultipleChoice => {
                    let mut counts: BTreeMap<String, i64> = BTreeMap::new();
                    for value in &values {
                        *counts.entry(value.option_key()).or_insert(0) += 1;
                    }
                    (Some(counts), None)
                }
                QuestionType::RatingScale => {
                    let ratings: Vec<i64> =
                        values.iter().filter_map(AnswerValue::as_rating).collect();
                    let average = if ratings.is_empty() {
                        0.0
                    } else {
                        let mean = ratings.iter().sum::<i64>() as f64 / ratings.len() as f64;
                        (mean * 10.0).round() / 10.0
                    };
                    (None, Some(average))
                }
                QuestionType::Text | QuestionType::YesNo => (None, None),
            };

            QuestionAnalytics {
                question_id: question.id.clone(),
                question_text: question.text.clone(),
                question_type: question.question_type,
                response_count: values.len() as i64,
                responses: values,
                option_counts,
                average_rating,
            }
        })
        .collect();

    SurveyAnalytics {
        total_responses,
        average_duration,
        responses_by_day,
        question_analytics,
    }
}
