// ABOUTME: Database connection management and storage initialization
// ABOUTME: Provides shared access to the SQLite pool and storage layers

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::responses::storage::ResponseStorage;
use crate::storage::surveys::SurveyStorage;
use crate::storage::StorageError;

/// Shared database state for API handlers
#[derive(Clone)]
pub struct DbState {
    pub pool: SqlitePool,
    pub survey_storage: Arc<SurveyStorage>,
    pub response_storage: Arc<ResponseStorage>,
}

impl DbState {
    /// Create new database state from a SQLite pool
    pub fn new(pool: SqlitePool) -> Self {
        let survey_storage = Arc::new(SurveyStorage::new(pool.clone()));
        let response_storage = Arc::new(ResponseStorage::new(pool.clone()));

        Self {
            pool,
            survey_storage,
            response_storage,
        }
    }

    /// Initialize database state with default configuration
    pub async fn init() -> Result<Self, StorageError> {
        Self::init_with_path(None).await
    }

    /// Initialize database state with optional custom database path
    pub async fn init_with_path(database_path: Option<PathBuf>) -> Result<Self, StorageError> {
        let database_path = database_path.unwrap_or_else(default_database_path);

        // Ensure parent directory exists
        if let Some(parent) = database_path.parent() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }

        let database_url = format!("sqlite:{}?mode=rwc", database_path.display());

        debug!("Connecting to database: {}", database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect(&database_url)
            .await
            .map_err(StorageError::Sqlx)?;

        // Configure SQLite settings
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        info!("Database connection established");

        // Run migrations
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(StorageError::Migration)?;

        debug!("Database migrations completed");

        Ok(Self::new(pool))
    }
}

/// Default on-disk database location
fn default_database_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".survey-portal")
        .join("survey-portal.db")
}
