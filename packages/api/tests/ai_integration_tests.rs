// ABOUTME: Integration tests for the AI proxy endpoints
// ABOUTME: Uses a wiremock collaborator; local validation never touches it

mod common;

use common::{get, post_json, setup_test_server_with_ai};
use serde_json::json;
use survey_portal_ai::AiClientConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ai_config_for(base_url: String) -> AiClientConfig {
    AiClientConfig {
        base_url,
        ..AiClientConfig::default()
    }
}

/// Configuration pointing at a port nothing listens on
fn dead_ai_config() -> AiClientConfig {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    ai_config_for(format!("http://{}", addr))
}

#[tokio::test]
async fn test_generate_survey_proxies_collaborator() {
    let ai_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-survey"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "questions": [
                {"type": "text", "text": "What do you think?", "required": true, "order": 0},
                {"type": "rating-scale", "text": "Rate us", "required": false, "order": 1}
            ]
        })))
        .expect(1)
        .mount(&ai_server)
        .await;

    let ctx = setup_test_server_with_ai(ai_config_for(ai_server.uri())).await;

    let response = post_json(
        &ctx.base_url,
        "/api/ai/generate-survey",
        &json!({
            "title": "Customer Feedback",
            "description": "Quarterly satisfaction survey",
            "category": "feedback",
            "targetAudience": "customers",
            "numberOfQuestions": 8
        }),
    )
    .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Survey generated successfully");
    assert_eq!(body["data"]["survey"]["aiGenerated"], true);
    assert_eq!(body["data"]["survey"]["title"], "Customer Feedback");
    assert_eq!(
        body["data"]["survey"]["questions"].as_array().unwrap().len(),
        2
    );
}

#[tokio::test]
async fn test_generate_survey_count_rejected_before_any_call() {
    let ai_server = MockServer::start().await;

    // The collaborator must never be reached
    Mock::given(method("POST"))
        .and(path("/generate-survey"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ai_server)
        .await;

    let ctx = setup_test_server_with_ai(ai_config_for(ai_server.uri())).await;

    let response = post_json(
        &ctx.base_url,
        "/api/ai/generate-survey",
        &json!({
            "title": "Customer Feedback",
            "description": "Quarterly satisfaction survey",
            "category": "feedback",
            "targetAudience": "customers",
            "numberOfQuestions": 20
        }),
    )
    .await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Number of questions must be between 5 and 15");
}

#[tokio::test]
async fn test_generate_survey_missing_fields_is_400() {
    let ctx = setup_test_server_with_ai(dead_ai_config()).await;

    let response = post_json(
        &ctx.base_url,
        "/api/ai/generate-survey",
        &json!({"title": "Only a title"}),
    )
    .await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "All required fields must be provided");
}

#[tokio::test]
async fn test_generate_survey_unreachable_collaborator_is_503() {
    let ctx = setup_test_server_with_ai(dead_ai_config()).await;

    let response = post_json(
        &ctx.base_url,
        "/api/ai/generate-survey",
        &json!({
            "title": "Customer Feedback",
            "description": "Quarterly satisfaction survey",
            "category": "feedback",
            "targetAudience": "customers"
        }),
    )
    .await;
    assert_eq!(response.status(), 503);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_improve_questions_proxies_collaborator() {
    let ai_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/improve-questions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "improvedQuestions": [
                {"original": "you happy", "improved": "Are you happy?", "type": "yes-no", "options": []}
            ]
        })))
        .mount(&ai_server)
        .await;

    let ctx = setup_test_server_with_ai(ai_config_for(ai_server.uri())).await;

    let response = post_json(
        &ctx.base_url,
        "/api/ai/improve-questions",
        &json!({
            "questions": [{"type": "yes-no", "text": "you happy"}],
            "improvementGoals": ["clarity"]
        }),
    )
    .await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Questions improved successfully");
    assert_eq!(
        body["data"]["improvedQuestions"][0]["improved"],
        "Are you happy?"
    );
}

#[tokio::test]
async fn test_improve_questions_requires_questions() {
    let ctx = setup_test_server_with_ai(dead_ai_config()).await;

    let response = post_json(
        &ctx.base_url,
        "/api/ai/improve-questions",
        &json!({"questions": []}),
    )
    .await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Questions array is required");
}

#[tokio::test]
async fn test_suggestions_require_category() {
    let ctx = setup_test_server_with_ai(dead_ai_config()).await;

    let response = get(&ctx.base_url, "/api/ai/suggestions").await;
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Category parameter is required");
}

#[tokio::test]
async fn test_suggestions_proxy() {
    let ai_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/suggestions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "suggestions": [
                {
                    "title": "Customer Satisfaction Survey",
                    "description": "Measure satisfaction",
                    "keyAreas": ["Service Quality"],
                    "expectedInsights": ["Satisfaction levels"],
                    "recommendedQuestions": 10
                }
            ]
        })))
        .mount(&ai_server)
        .await;

    let ctx = setup_test_server_with_ai(ai_config_for(ai_server.uri())).await;

    let response = get(&ctx.base_url, "/api/ai/suggestions?category=feedback").await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["data"]["suggestions"][0]["recommendedQuestions"],
        10
    );
}

#[tokio::test]
async fn test_ai_health_up() {
    let ai_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "service": "AI Survey Generator"
        })))
        .mount(&ai_server)
        .await;

    let ctx = setup_test_server_with_ai(ai_config_for(ai_server.uri())).await;

    let response = get(&ctx.base_url, "/api/ai/health").await;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["aiServiceStatus"]["status"], "healthy");
}

#[tokio::test]
async fn test_ai_health_down_is_503() {
    let ctx = setup_test_server_with_ai(dead_ai_config()).await;

    let response = get(&ctx.base_url, "/api/ai/health").await;
    assert_eq!(response.status(), 503);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "AI service is unavailable");
}
