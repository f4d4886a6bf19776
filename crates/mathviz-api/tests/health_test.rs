//! Integration tests for the health and root endpoints.

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_offline_app(dir.path());

    let (status, json) = common::get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "mathviz-api");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_root_returns_banner() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_offline_app(dir.path());

    let (status, json) = common::get_json(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Math Visualizer API");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_offline_app(dir.path());

    let status = common::get_status(app, "/api/v1/nonexistent").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
