//! Render endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::post};
use mathviz_core::job::RenderRequest;
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::ServiceState;

/// Response body for POST /render.
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    /// Absolute path of the rendered video.
    pub video_path: String,
}

/// POST /render
#[instrument(skip(state, request), fields(scene = request.scene_key().unwrap_or_default()))]
async fn render(
    State(state): State<ServiceState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, ApiError> {
    let path = state.renderer.render(&request).await?;
    info!(path = %path.display(), "render request completed");

    Ok(Json(RenderResponse {
        video_path: path.to_string_lossy().into_owned(),
    }))
}

/// Returns the render router.
pub fn router() -> Router<ServiceState> {
    Router::new().route("/render", post(render))
}
