//! Integration tests for the operational endpoints

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_endpoint() {
    let app = common::TestApp::without_database();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    let body = common::json_body(&body);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "ml-fitness-backend");
}

#[tokio::test]
async fn test_liveness_endpoint() {
    let app = common::TestApp::without_database();

    let (status, body) = app.get("/health/live").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("alive"));
}

#[tokio::test]
async fn test_metrics_absent_without_recorder() {
    let app = common::TestApp::without_database();

    let (status, _) = app.get("/metrics").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_v1_root() {
    let app = common::TestApp::without_database();

    let (status, body) = app.get("/api/v1/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("ML Fitness API v1"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_readiness_endpoint() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get("/health/ready").await;

    assert_eq!(status, StatusCode::OK);
    let body = common::json_body(&body);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"]["healthy"], true);
    assert_eq!(body["checks"]["food_providers"][0], "Open Food Facts");
    assert_eq!(body["checks"]["mock_fallback"], true);
}
