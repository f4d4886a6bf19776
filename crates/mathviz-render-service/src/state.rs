//! Shared render service state.

use std::sync::Arc;

use crate::renderer::SceneRenderer;

/// State shared across render service handlers.
#[derive(Debug, Clone)]
pub struct ServiceState {
    /// Registry-backed renderer.
    pub renderer: Arc<SceneRenderer>,
}

impl ServiceState {
    /// Create new service state.
    #[must_use]
    pub fn new(renderer: Arc<SceneRenderer>) -> Self {
        Self { renderer }
    }
}
