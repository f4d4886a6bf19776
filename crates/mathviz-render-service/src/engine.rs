//! The opaque scene engine that turns a scene and parameters into video.

use std::io::Write;
use std::path::Path;

use async_trait::async_trait;
use mathviz_core::config::CommandSpec;
use mathviz_core::error::PipelineError;
use mathviz_core::job::Parameters;
use mathviz_scenes::SceneHandle;
use tokio::process::Command;
use tracing::debug;

/// Renders one scene to `output`.
#[async_trait]
pub trait SceneEngine: Send + Sync {
    /// Renders `handle` with `parameters` and writes the video to `output`.
    async fn render_scene(
        &self,
        handle: &SceneHandle,
        parameters: &Parameters,
        output: &Path,
    ) -> Result<(), PipelineError>;
}

/// Runs `<program> [args..] <handle> <params.json> <output.mp4>`.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    command: CommandSpec,
}

impl CommandEngine {
    /// Creates an engine around an external command.
    #[must_use]
    pub fn new(command: CommandSpec) -> Self {
        Self { command }
    }
}

fn write_parameters(parameters: &Parameters) -> Result<tempfile::NamedTempFile, PipelineError> {
    let mut file = tempfile::Builder::new()
        .prefix("scene_params_")
        .suffix(".json")
        .tempfile()?;
    serde_json::to_writer(file.as_file_mut(), parameters)
        .map_err(|e| PipelineError::Renderer(format!("serialize parameters: {e}")))?;
    file.flush()?;
    Ok(file)
}

#[async_trait]
impl SceneEngine for CommandEngine {
    async fn render_scene(
        &self,
        handle: &SceneHandle,
        parameters: &Parameters,
        output: &Path,
    ) -> Result<(), PipelineError> {
        let params_file = write_parameters(parameters)?;
        debug!(program = %self.command.program, %handle, output = %output.display(), "running scene engine");

        let result = Command::new(&self.command.program)
            .args(&self.command.args)
            .arg(handle.as_str())
            .arg(params_file.path())
            .arg(output)
            .output()
            .await
            .map_err(|e| {
                PipelineError::CollaboratorUnavailable(format!(
                    "failed to launch {}: {e}",
                    self.command.program
                ))
            })?;

        if result.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&result.stderr);
        let diagnostic = if stderr.trim().is_empty() {
            "Unknown error"
        } else {
            stderr.trim()
        };
        Err(PipelineError::Renderer(format!(
            "scene engine failed ({}): {diagnostic}",
            result.status
        )))
    }
}
