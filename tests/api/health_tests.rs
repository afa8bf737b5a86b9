//! Health Check API Tests

use axum::http::StatusCode;

use crate::common::{body_json, TestApp};

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_check_returns_status_and_version() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;
    let json = body_json(response).await;

    assert_eq!(json["status"], "healthy");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoints_are_public() {
    // No Authorization header, must still be reachable
    let app = TestApp::new().await;

    let response = app.get("/health").await;

    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
}
