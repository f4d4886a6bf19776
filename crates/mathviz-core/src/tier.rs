//! Render tier abstraction.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::job::{RenderRequest, RenderTierKind};

/// One fallible level in the render dispatch chain.
#[async_trait]
pub trait RenderTier: Send + Sync {
    /// Which tier this is, recorded on the `RenderResult`.
    fn kind(&self) -> RenderTierKind;

    /// Attempts to render the request and returns the artifact path.
    ///
    /// # Errors
    ///
    /// Returns a recoverable `PipelineError` when the dispatcher should try the
    /// next tier, or `PipelineError::Catastrophic` to abort the dispatch.
    async fn render(&self, request: &RenderRequest) -> Result<PathBuf, PipelineError>;
}
