//! Prompt-to-visualization endpoint.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Json, Router, routing::post};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::error::ApiError;
use crate::state::AppState;

/// Response header naming the render tier that produced the artifact, so
/// clients and operators can tell real renders from placeholders.
pub const RENDER_TIER_HEADER: &str = "x-render-tier";

/// Request body for POST /api/generate.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    /// Free-text description of the desired visualization.
    pub prompt: String,
}

/// POST /api/generate
#[instrument(skip(state, request), fields(prompt_len = request.prompt.len()))]
async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let outcome = state.orchestrator.generate(&request.prompt).await?;

    info!(
        tier = %outcome.tier,
        video_url = %outcome.response.video_url,
        "generate request completed"
    );

    Ok((
        [(RENDER_TIER_HEADER, outcome.tier.as_str())],
        Json(outcome.response),
    ))
}

/// Returns the generate router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/generate", post(generate))
}
