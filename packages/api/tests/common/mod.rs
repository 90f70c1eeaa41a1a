// ABOUTME: Common test utilities for integration tests
// ABOUTME: Provides test server setup, database helpers, and HTTP client utilities

use axum::Router;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use survey_portal_ai::AiClientConfig;
use survey_portal_api::{
    create_ai_router, create_responses_router, create_surveys_router, AppState,
};
use survey_portal_surveys::DbState;

/// Test context containing server URL and database pool
pub struct TestContext {
    pub base_url: String,
    #[allow(dead_code)]
    pub pool: SqlitePool,
}

/// Create a test server with an isolated in-memory database
#[allow(dead_code)]
pub async fn setup_test_server() -> TestContext {
    setup_test_server_with_ai(AiClientConfig::default()).await
}

/// Create a test server whose AI client points at the given configuration
pub async fn setup_test_server_with_ai(ai_config: AiClientConfig) -> TestContext {
    // A single connection keeps every query on the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!("../surveys/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let db = DbState::new(pool.clone());
    let state = AppState::new(&db, ai_config);

    let app = Router::new()
        .nest("/api/surveys", create_surveys_router())
        .nest("/api/responses", create_responses_router())
        .nest("/api/ai", create_ai_router())
        .with_state(state);

    // Bind to random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server time to start
    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

    TestContext { base_url, pool }
}

/// Helper to make GET requests
#[allow(dead_code)]
pub async fn get(base_url: &str, path: &str) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .get(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make GET request")
}

/// Helper to make POST requests with JSON body
#[allow(dead_code)]
pub async fn post_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .post(format!("{}{}", base_url, path))
        .json(body)
        .send()
        .await
        .expect("Failed to make POST request")
}

/// Helper to make PUT requests with JSON body
#[allow(dead_code)]
pub async fn put_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .put(format!("{}{}", base_url, path))
        .json(body)
        .send()
        .await
        .expect("Failed to make PUT request")
}

/// Helper to make PATCH requests with JSON body
#[allow(dead_code)]
pub async fn patch_json<T: serde::Serialize>(
    base_url: &str,
    path: &str,
    body: &T,
) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .patch(format!("{}{}", base_url, path))
        .json(body)
        .send()
        .await
        .expect("Failed to make PATCH request")
}

/// Helper to make DELETE requests
#[allow(dead_code)]
pub async fn delete(base_url: &str, path: &str) -> reqwest::Response {
    let client = reqwest::Client::new();
    client
        .delete(format!("{}{}", base_url, path))
        .send()
        .await
        .expect("Failed to make DELETE request")
}

/// Create a survey through the API and return its body
#[allow(dead_code)]
pub async fn create_survey(
    base_url: &str,
    title: &str,
    status: &str,
    questions: serde_json::Value,
) -> serde_json::Value {
    let response = post_json(
        base_url,
        "/api/surveys",
        &serde_json::json!({
            "title": title,
            "description": "A survey created by the integration test suite",
            "category": "feedback",
            "targetAudience": "general",
            "status": status,
            "questions": questions
        }),
    )
    .await;
    assert_eq!(response.status(), 201, "survey creation should succeed");

    let body: serde_json::Value = response.json().await.unwrap();
    body["data"].clone()
}
