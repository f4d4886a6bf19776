//! Math Visualizer: render backend.
//!
//! Owns the scene registry and the opaque scene engine. The same
//! [`SceneRenderer`] backs both the HTTP render service and the one-shot
//! render-worker CLI.

pub mod engine;
pub mod error;
pub mod renderer;
pub mod routes;
pub mod state;
pub mod worker;

use std::sync::Arc;

use axum::Router;
use mathviz_core::config::SceneConfig;
use mathviz_scenes::{DirectorySource, SceneRegistry, SceneSource, builtin};
use tracing::warn;

pub use engine::{CommandEngine, SceneEngine};
pub use renderer::SceneRenderer;

use crate::state::ServiceState;

/// Builds the registry: built-in scenes, then the plugin directory if one is
/// configured. Discovery problems are logged and never abort startup.
#[must_use]
pub fn load_registry(config: &SceneConfig) -> SceneRegistry {
    let extra: Vec<Box<dyn SceneSource>> = match &config.plugin_dir {
        Some(dir) => DirectorySource::new(dir).sources().unwrap_or_else(|e| {
            warn!(error = %e, "plugin directory unavailable, using built-in scenes only");
            Vec::new()
        }),
        None => Vec::new(),
    };

    let (registry, _report) = builtin::startup_registry(&extra);
    registry
}

/// Builds the renderer described by `config` around the command engine.
#[must_use]
pub fn renderer_from_config(config: &SceneConfig) -> SceneRenderer {
    SceneRenderer::new(
        Arc::new(load_registry(config)),
        Arc::new(CommandEngine::new(config.engine.clone())),
        &config.renders_dir,
    )
}

/// Builds the render service router without transport layers.
pub fn build_router(state: ServiceState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::render::router())
        .merge(routes::scenes::router())
        .with_state(state)
}
