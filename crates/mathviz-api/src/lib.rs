//! Math Visualizer: public API server.
//!
//! Exposes `POST /api/generate`, which runs one prompt through refinement,
//! render dispatch and explanation, and hosts the rendered artifacts under
//! `/renders`.

pub mod error;
pub mod orchestrator;
pub mod routes;
pub mod state;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Builds the application router without transport layers.
pub fn build_router(state: AppState) -> Router {
    let renders = ServeDir::new(&state.renders_dir);
    Router::new()
        .merge(routes::root::router())
        .merge(routes::health::router())
        .merge(routes::generate::router())
        .nest_service("/renders", renders)
        .with_state(state)
}
