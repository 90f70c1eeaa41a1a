// ABOUTME: Response storage layer using SQLite
// ABOUTME: Handles response inserts, per-survey listing, and cascade deletes

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::types::{Answer, ResponseMetadata, SurveyResponse};
use crate::storage::{format_timestamp, parse_timestamp, StorageError, StorageResult};

pub struct ResponseStorage {
    pool: SqlitePool,
}

impl ResponseStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a stored response. Responses are immutable after this point.
    pub async fn insert_response(&self, response: &SurveyResponse) -> StorageResult<()> {
        debug!(
            "Inserting response {} for survey {}",
            response.id, response.survey_id
        );

        let answers_json = serde_json::to_string(&response.answers)?;

        sqlx::query(
            r#"
            INSERT INTO responses (
                id, survey_id, answers, ip, user_agent, start_time, submit_time,
                duration, anonymous, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&response.id)
        .bind(&response.survey_id)
        .bind(&answers_json)
        .bind(&response.metadata.ip)
        .bind(&response.metadata.user_agent)
        .bind(format_timestamp(&response.metadata.start_time))
        .bind(format_timestamp(&response.metadata.submit_time))
        .bind(response.metadata.duration)
        .bind(response.anonymous)
        .bind(format_timestamp(&response.created_at))
        .bind(format_timestamp(&response.updated_at))
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(())
    }

    /// List a page of a survey's responses, newest first
    pub async fn list_by_survey(
        &self,
        survey_id: &str,
        limit: i64,
        offset: i64,
    ) -> StorageResult<Vec<SurveyResponse>> {
        let rows = sqlx::query(
            "SELECT * FROM responses WHERE survey_id = ? ORDER BY created_at DESC LIMIT ? OFFSET ?",
        )
        .bind(survey_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        rows.iter().map(|row| self.row_to_response(row)).collect()
    }

    /// Load every response for a survey, oldest first (analytics input)
    pub async fn list_all_by_survey(&self, survey_id: &str) -> StorageResult<Vec<SurveyResponse>> {
        let rows =
            sqlx::query("SELECT * FROM responses WHERE survey_id = ? ORDER BY created_at ASC")
                .bind(survey_id)
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        rows.iter().map(|row| self.row_to_response(row)).collect()
    }

    /// Count a survey's responses
    pub async fn count_by_survey(&self, survey_id: &str) -> StorageResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM responses WHERE survey_id = ?")
            .bind(survey_id)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)
    }

    /// Delete all responses referencing a survey, returning how many went
    pub async fn delete_by_survey(&self, survey_id: &str) -> StorageResult<u64> {
        let result = sqlx::query("DELETE FROM responses WHERE survey_id = ?")
            .bind(survey_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected())
    }

    /// Convert a database row to a SurveyResponse
    fn row_to_response(&self, row: &SqliteRow) -> StorageResult<SurveyResponse> {
        let answers_json: String = row.try_get("answers")?;
        let answers: Vec<Answer> = serde_json::from_str(&answers_json)?;

        let start_time_str: String = row.try_get("start_time")?;
        let submit_time_str: String = row.try_get("submit_time")?;
        let created_at_str: String = row.try_get("created_at")?;
        let updated_at_str: String = row.try_get("updated_at")?;

        Ok(SurveyResponse {
            id: row.try_get("id")?,
            survey_id: row.try_get("survey_id")?,
            answers,
            metadata: ResponseMetadata {
                ip: row.try_get("ip")?,
                user_agent: row.try_get("user_agent")?,
                start_time: parse_timestamp(&start_time_str, "start_time")?,
                submit_time: parse_timestamp(&submit_time_str, "submit_time")?,
                duration: row.try_get("duration")?,
            },
            anonymous: row.try_get("anonymous")?,
            created_at: parse_timestamp(&created_at_str, "created_at")?,
            updated_at: parse_timestamp(&updated_at_str, "updated_at")?,
        })
    }
}
