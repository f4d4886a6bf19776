//! Local render-worker subprocess tier.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mathviz_core::config::CommandSpec;
use mathviz_core::error::PipelineError;
use mathviz_core::job::{RenderRequest, RenderTierKind};
use mathviz_core::tier::RenderTier;
use tokio::process::Command;
use tracing::debug;

/// Runs `<worker> [args..] <request.json>` and reads the artifact path from
/// stdout.
///
/// The request file lives in the system temp directory, never in the served
/// renders directory, and is removed when the call returns.
#[derive(Debug, Clone)]
pub struct SubprocessTier {
    command: CommandSpec,
    renders_dir: PathBuf,
}

impl SubprocessTier {
    /// Creates a subprocess tier. Relative worker output resolves against
    /// `renders_dir`.
    #[must_use]
    pub fn new(command: CommandSpec, renders_dir: &Path) -> Self {
        Self {
            command,
            renders_dir: renders_dir.to_path_buf(),
        }
    }

    /// Interprets worker stdout: absolute paths are used verbatim, relative
    /// ones are resolved against the render-output directory.
    fn resolve_artifact(&self, stdout: &str) -> Option<PathBuf> {
        let line = stdout.trim();
        if line.is_empty() {
            return None;
        }
        let path = Path::new(line);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(self.renders_dir.join(path))
        }
    }

}

fn write_request(request: &RenderRequest) -> Result<tempfile::NamedTempFile, PipelineError> {
    let write_failed = |e: std::io::Error| PipelineError::Renderer(format!("write request file: {e}"));
    let mut file = tempfile::Builder::new()
        .prefix("render_request_")
        .suffix(".json")
        .tempfile()
        .map_err(write_failed)?;
    serde_json::to_writer(file.as_file_mut(), request)
        .map_err(|e| PipelineError::Renderer(format!("serialize request: {e}")))?;
    file.flush().map_err(write_failed)?;
    Ok(file)
}

#[async_trait]
impl RenderTier for SubprocessTier {
    fn kind(&self) -> RenderTierKind {
        RenderTierKind::Subprocess
    }

    async fn render(&self, request: &RenderRequest) -> Result<PathBuf, PipelineError> {
        let request_file = write_request(request)?;
        debug!(program = %self.command.program, request = %request_file.path().display(), "running render worker");

        let output = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(request_file.path())
            .output()
            .await;
        drop(request_file);

        let output = output.map_err(|e| {
            PipelineError::CollaboratorUnavailable(format!(
                "failed to launch {}: {e}",
                self.command.program
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let diagnostic = if stderr.trim().is_empty() {
                "Unknown error"
            } else {
                stderr.trim()
            };
            return Err(PipelineError::Renderer(format!(
                "render worker failed ({}): {diagnostic}",
                output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        self.resolve_artifact(&stdout)
            .ok_or_else(|| PipelineError::Renderer("render worker printed no artifact path".into()))
    }
}
