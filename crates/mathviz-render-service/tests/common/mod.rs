//! Shared test helpers for render service integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mathviz_core::error::PipelineError;
use mathviz_core::job::Parameters;
use mathviz_render_service::state::ServiceState;
use mathviz_render_service::{SceneEngine, SceneRenderer, build_router};
use mathviz_scenes::{SceneHandle, builtin};
use tower::ServiceExt;

/// Writes `<handle>\n<parameters json>` as the "video".
pub struct EchoEngine;

#[async_trait]
impl SceneEngine for EchoEngine {
    async fn render_scene(
        &self,
        handle: &SceneHandle,
        parameters: &Parameters,
        output: &Path,
    ) -> Result<(), PipelineError> {
        let body = format!("{handle}\n{}", serde_json::to_string(parameters).unwrap());
        tokio::fs::write(output, body).await?;
        Ok(())
    }
}

/// Always fails like a crashed engine.
pub struct CrashingEngine;

#[async_trait]
impl SceneEngine for CrashingEngine {
    async fn render_scene(
        &self,
        _handle: &SceneHandle,
        _parameters: &Parameters,
        _output: &Path,
    ) -> Result<(), PipelineError> {
        Err(PipelineError::Renderer("segfault in scene engine".into()))
    }
}

/// A renderer over the built-in registry.
pub fn builtin_renderer(engine: Arc<dyn SceneEngine>, renders_dir: &Path) -> SceneRenderer {
    let (registry, _) = builtin::startup_registry(&[]);
    SceneRenderer::new(Arc::new(registry), engine, renders_dir)
}

/// Build the full render service router. Uses the same route structure as
/// `main.rs`.
pub fn build_test_app(engine: Arc<dyn SceneEngine>, renders_dir: &Path) -> Router {
    build_router(ServiceState::new(Arc::new(builtin_renderer(
        engine,
        renders_dir,
    ))))
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
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
