//! Shared application state.

use std::path::PathBuf;
use std::sync::Arc;

use crate::orchestrator::Orchestrator;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The per-request pipeline.
    pub orchestrator: Arc<Orchestrator>,
    /// Directory served under `/renders`.
    pub renders_dir: PathBuf,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(orchestrator: Arc<Orchestrator>, renders_dir: PathBuf) -> Self {
        Self {
            orchestrator,
            renders_dir,
        }
    }
}
