//! Root banner endpoint.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::AppState;

/// Root response.
#[derive(Serialize)]
pub struct RootResponse {
    /// Human-readable banner.
    pub message: &'static str,
}

/// GET /
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Math Visualizer API",
    })
}

/// Returns the root router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(root))
}
