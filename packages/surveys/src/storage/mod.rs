use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;

pub mod surveys;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Record not found")]
    NotFound,
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Generate a unique record ID
pub fn generate_id() -> String {
    use uuid::Uuid;
    Uuid::new_v4().to_string()
}

/// Format a timestamp for storage. Millisecond precision keeps the column
/// lexicographically sortable, which the created_at indexes rely on.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp column
pub fn parse_timestamp(raw: &str, column: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| StorageError::Database(format!("Invalid {} timestamp", column)))
}
