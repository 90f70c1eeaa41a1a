// ABOUTME: Survey storage layer using SQLite
// ABOUTME: Handles survey CRUD, filtered listing, and the response counter

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::debug;

use super::{format_timestamp, parse_timestamp, StorageError, StorageResult};
use crate::types::{
    Question, Survey, SurveyCategory, SurveyListFilter, SurveyStatus, TargetAudience,
};

/// Parsed, storage-ready survey changes for a partial update
#[derive(Debug, Clone, Default)]
pub struct SurveyChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<SurveyCategory>,
    pub target_audience: Option<TargetAudience>,
    pub questions: Option<Vec<Question>>,
    pub status: Option<SurveyStatus>,
    pub ai_generated: Option<bool>,
    pub created_by: Option<String>,
}

pub struct SurveyStorage {
    pool: SqlitePool,
}

impl SurveyStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a fully-built survey
    pub async fn insert_survey(&self, survey: &Survey) -> StorageResult<()> {
        debug!("Inserting survey: {} ({})", survey.id, survey.title);

        let questions_json = serde_json::to_string(&survey.questions)?;

        sqlx::query(
            r#"
            INSERT INTO surveys (
                id, title, description, category, target_audience, questions,
                status, response_count, ai_generated, created_by, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&survey.id)
        .bind(&survey.title)
        .bind(&survey.description)
        .bind(survey.category.as_str())
        .bind(survey.target_audience.as_str())
        .bind(&questions_json)
        .bind(survey.status.as_str())
        .bind(survey.response_count)
        .bind(survey.ai_generated)
        .bind(&survey.created_by)
        .bind(format_timestamp(&survey.created_at))
        .bind(format_timestamp(&survey.updated_at))
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(())
    }

    /// Get a single survey by ID
    pub async fn get_survey(&self, id: &str) -> StorageResult<Option<Survey>> {
        let row = sqlx::query("SELECT * FROM surveys WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(r) => Ok(Some(self.row_to_survey(&r)?)),
            None => Ok(None),
        }
    }

    /// List surveys matching the filter, newest first
    pub async fn list_surveys(
        &self,
        filter: &SurveyListFilter,
        limit: i64,
        offset: i64,
    ) -> StorageResult<Vec<Survey>> {
        debug!(
            "Listing surveys (status: {:?}, category: {:?}, limit: {}, offset: {})",
            filter.status, filter.category, limit, offset
        );

        let mut conditions = Vec::new();
        if filter.status.is_some() {
            conditions.push("status = ?");
        }
        if filter.category.is_some() {
            conditions.push("category = ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let query_str = format!(
            "SELECT * FROM surveys{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            where_clause
        );

        let mut query = sqlx::query(&query_str);
        if let Some(ref status) = filter.status {
            query = query.bind(status);
        }
        if let Some(ref category) = filter.category {
            query = query.bind(category);
        }
        query = query.bind(limit).bind(offset);

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(|row| self.row_to_survey(row)).collect()
    }

    /// Count surveys matching the filter
    pub async fn count_surveys(&self, filter: &SurveyListFilter) -> StorageResult<i64> {
        let mut conditions = Vec::new();
        if filter.status.is_some() {
            conditions.push("status = ?");
        }
        if filter.category.is_some() {
            conditions.push("category = ?");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let query_str = format!("SELECT COUNT(*) FROM surveys{}", where_clause);

        let mut query = sqlx::query_scalar(&query_str);
        if let Some(ref status) = filter.status {
            query = query.bind(status);
        }
        if let Some(ref category) = filter.category {
            query = query.bind(category);
        }

        query.fetch_one(&self.pool).await.map_err(StorageError::Sqlx)
    }

    /// Apply a partial update, returning the updated survey
    pub async fn update_survey(&self, id: &str, changes: SurveyChanges) -> StorageResult<Survey> {
        debug!("Updating survey: {}", id);

        let mut query_parts = Vec::new();
        if changes.title.is_some() {
            query_parts.push("title = ?");
        }
        if changes.description.is_some() {
            query_parts.push("description = ?");
        }
        if changes.category.is_some() {
            query_parts.push("category = ?");
        }
        if changes.target_audience.is_some() {
            query_parts.push("target_audience = ?");
        }
        if changes.questions.is_some() {
            query_parts.push("questions = ?");
        }
        if changes.status.is_some() {
            query_parts.push("status = ?");
        }
        if changes.ai_generated.is_some() {
            query_parts.push("ai_generated = ?");
        }
        if changes.created_by.is_some() {
            query_parts.push("created_by = ?");
        }
        query_parts.push("updated_at = ?");

        let query_str = format!(
            "UPDATE surveys SET {} WHERE id = ?",
            query_parts.join(", ")
        );

        let questions_json = changes
            .questions
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let mut query = sqlx::query(&query_str);
        if let Some(title) = changes.title {
            query = query.bind(title);
        }
        if let Some(description) = changes.description {
            query = query.bind(description);
        }
        if let Some(category) = changes.category {
            query = query.bind(category.as_str());
        }
        if let Some(target_audience) = changes.target_audience {
            query = query.bind(target_audience.as_str());
        }
        if let Some(json) = questions_json {
            query = query.bind(json);
        }
        if let Some(status) = changes.status {
            query = query.bind(status.as_str());
        }
        if let Some(ai_generated) = changes.ai_generated {
            query = query.bind(ai_generated);
        }
        if let Some(created_by) = changes.created_by {
            query = query.bind(created_by);
        }
        query = query
            .bind(format_timestamp(&chrono::Utc::now()))
            .bind(id);

        let result = query
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_survey(id).await?.ok_or(StorageError::NotFound)
    }

    /// Persist a status change, returning the updated survey
    pub async fn set_status(&self, id: &str, status: SurveyStatus) -> StorageResult<Survey> {
        debug!("Setting survey {} status to {}", id, status);

        let result = sqlx::query("UPDATE surveys SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(format_timestamp(&chrono::Utc::now()))
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_survey(id).await?.ok_or(StorageError::NotFound)
    }

    /// Delete a survey, returning whether a row was removed
    pub async fn delete_survey(&self, id: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM surveys WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(result.rows_affected() > 0)
    }

    /// Atomically bump the response counter by one. The engine serializes
    /// this read-modify-write, which keeps the counter correct under
    /// concurrent submissions.
    pub async fn increment_response_count(&self, id: &str) -> StorageResult<()> {
        sqlx::query(
            "UPDATE surveys SET response_count = response_count + 1, updated_at = ? WHERE id = ?",
        )
        .bind(format_timestamp(&chrono::Utc::now()))
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        Ok(())
    }

    /// Convert a database row to a Survey
    fn row_to_survey(&self, row: &SqliteRow) -> StorageResult<Survey> {
        let questions_json: String = row.try_get("questions")?;
        let questions: Vec<Question> = serde_json::from_str(&questions_json)?;

        let category_str: String = row.try_get("category")?;
        let category = SurveyCategory::parse(&category_str).unwrap_or(SurveyCategory::Other);

        let target_audience_str: String = row.try_get("target_audience")?;
        let target_audience =
            TargetAudience::parse(&target_audience_str).unwrap_or(TargetAudience::General);

        let status_str: String = row.try_get("status")?;
        let status = SurveyStatus::parse(&status_str).unwrap_or(SurveyStatus::Draft);

        let created_at_str: String = row.try_get("created_at")?;
        let updated_at_str: String = row.try_get("updated_at")?;

        Ok(Survey {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            category,
            target_audience,
            questions,
            status,
            response_count: row.try_get("response_count")?,
            ai_generated: row.try_get("ai_generated")?,
            created_by: row.try_get("created_by")?,
            created_at: parse_timestamp(&created_at_str, "created_at")?,
            updated_at: parse_timestamp(&updated_at_str, "updated_at")?,
        })
    }
}
