//! Registry introspection endpoint.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::state::ServiceState;

/// Response body for GET /scenes.
#[derive(Debug, Serialize)]
pub struct ScenesResponse {
    /// Registered keys, sorted.
    pub scenes: Vec<String>,
    /// Parameter schema per key.
    pub schemas: BTreeMap<String, BTreeMap<String, String>>,
}

/// GET /scenes
async fn list_scenes(State(state): State<ServiceState>) -> Json<ScenesResponse> {
    let registry = state.renderer.registry();
    Json(ScenesResponse {
        scenes: registry.list_keys(),
        schemas: registry.schemas(),
    })
}

/// Returns the scenes router.
pub fn router() -> Router<ServiceState> {
    Router::new().route("/scenes", get(list_scenes))
}
