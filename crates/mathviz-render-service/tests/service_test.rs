//! Integration tests for the render service endpoints.

mod common;

use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(Arc::new(common::EchoEngine), dir.path());

    let (status, json) = common::get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "mathviz-render-service");
}

#[tokio::test]
async fn test_scenes_lists_sorted_keys_with_schemas() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(Arc::new(common::EchoEngine), dir.path());

    let (status, json) = common::get_json(app, "/scenes").await;

    assert_eq!(status, StatusCode::OK);
    let scenes: Vec<&str> = json["scenes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(scenes.len(), 14);
    assert!(scenes.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(scenes.contains(&"fourier_series"));
    assert!(json["schemas"]["fourier_series"]["terms"].is_string());
}

#[tokio::test]
async fn test_render_filters_parameters_and_returns_absolute_path() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(Arc::new(common::EchoEngine), dir.path());

    // Act
    let (status, json) = common::post_json(
        app,
        "/render",
        &json!({ "type": "fourier_series", "parameters": { "terms": [1, 3], "speed": 2 } }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let path = Path::new(json["video_path"].as_str().unwrap());
    assert!(path.is_absolute());
    assert_eq!(path.file_name().unwrap(), "fourier_series.mp4");
    let written = std::fs::read_to_string(path).unwrap();
    assert_eq!(written, "FourierSquareWave\n{\"terms\":[1,3]}");
}

#[tokio::test]
async fn test_render_accepts_visualization_type_alias() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(Arc::new(common::EchoEngine), dir.path());

    let (status, json) = common::post_json(
        app,
        "/render",
        &json!({ "visualization_type": "vector", "parameters": {} }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["video_path"].as_str().unwrap().ends_with("vector.mp4"));
}

#[tokio::test]
async fn test_render_unknown_type_produces_unsupported_notice() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(Arc::new(common::EchoEngine), dir.path());

    let (status, json) = common::post_json(
        app,
        "/render",
        &json!({ "type": "taylor_series", "parameters": { "terms": 5 } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let written = std::fs::read_to_string(json["video_path"].as_str().unwrap()).unwrap();
    assert!(written.starts_with("UnsupportedScene\n"));
}

#[tokio::test]
async fn test_engine_failure_returns_500_with_reason() {
    let dir = tempfile::tempdir().unwrap();
    let app = common::build_test_app(Arc::new(common::CrashingEngine), dir.path());

    let (status, json) = common::post_json(
        app,
        "/render",
        &json!({ "type": "vector", "parameters": {} }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "renderer_failure");
    assert!(json["message"].as_str().unwrap().contains("segfault"));
}
