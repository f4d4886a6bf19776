//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use http_body_util::BodyExt;
use mathviz_core::job::RenderTierKind;
use mathviz_language::{Explainer, Refiner};
use mathviz_render::RenderDispatcher;
use mathviz_test_support::TaggedTier;
use tower::ServiceExt;

use mathviz_api::orchestrator::Orchestrator;
use mathviz_api::state::AppState;

/// Build the full app router around `dispatcher` with offline language
/// stages. Uses the same route structure as `main.rs`.
pub fn build_test_app(dispatcher: RenderDispatcher, renders_dir: &Path) -> Router {
    let orchestrator = Orchestrator::new(Refiner::offline(), dispatcher, Explainer::offline());
    let app_state = AppState::new(Arc::new(orchestrator), renders_dir.to_path_buf());
    mathviz_api::build_router(app_state)
}

/// Build the app with a dispatcher whose only tier is a tagging placeholder.
pub fn build_offline_app(renders_dir: &Path) -> Router {
    build_test_app(
        RenderDispatcher::new(vec![], Arc::new(TaggedTier::new(RenderTierKind::Placeholder))),
        renders_dir,
    )
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, HeaderMap, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, headers, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return only the status.
pub async fn get_status(app: Router, uri: &str) -> StatusCode {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    app.oneshot(request).await.unwrap().status()
}
