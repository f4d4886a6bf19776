//! One-shot rendering of a request file, as used by the subprocess tier.

use std::path::{Path, PathBuf};

use mathviz_core::error::PipelineError;
use mathviz_core::job::RenderRequest;

use crate::renderer::SceneRenderer;

/// Reads a `{type, parameters}` file and renders it.
///
/// # Errors
///
/// Returns `PipelineError::Renderer` when the file cannot be read,
/// `PipelineError::MalformedOutput` when it is not a render request, and any
/// error from [`SceneRenderer::render`].
pub async fn render_request_file(
    renderer: &SceneRenderer,
    request_file: &Path,
) -> Result<PathBuf, PipelineError> {
    let bytes = tokio::fs::read(request_file).await.map_err(|e| {
        PipelineError::Renderer(format!(
            "cannot read request file {}: {e}",
            request_file.display()
        ))
    })?;
    let request: RenderRequest = serde_json::from_slice(&bytes)
        .map_err(|e| PipelineError::MalformedOutput(format!("request file: {e}")))?;
    renderer.render(&request).await
}
