//! Placeholder tier: the last resort that always yields a path.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mathviz_core::error::PipelineError;
use mathviz_core::ids::{ArtifactIdSource, file_stem_for};
use mathviz_core::job::{RenderRequest, RenderTierKind};
use mathviz_core::tier::RenderTier;
use tokio::process::Command;
use tracing::{info, warn};

/// How long the encoder may run before the empty-file fallback is used.
pub const DEFAULT_ENCODE_TIMEOUT: Duration = Duration::from_secs(60);

/// Synthesizes `{type}_{id}.mp4`: a 3 s test-pattern clip when the encoder
/// is available, otherwise an empty file at the same path.
pub struct PlaceholderTier {
    renders_dir: PathBuf,
    ffmpeg_program: String,
    encode_timeout: Duration,
    ids: Arc<dyn ArtifactIdSource>,
}

impl std::fmt::Debug for PlaceholderTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaceholderTier")
            .field("renders_dir", &self.renders_dir)
            .field("ffmpeg_program", &self.ffmpeg_program)
            .field("encode_timeout", &self.encode_timeout)
            .finish_non_exhaustive()
    }
}

impl PlaceholderTier {
    /// Creates a placeholder tier.
    #[must_use]
    pub fn new(renders_dir: &Path, ffmpeg_program: &str, ids: Arc<dyn ArtifactIdSource>) -> Self {
        Self {
            renders_dir: renders_dir.to_path_buf(),
            ffmpeg_program: ffmpeg_program.to_owned(),
            encode_timeout: DEFAULT_ENCODE_TIMEOUT,
            ids,
        }
    }

    /// Overrides the encoder time limit.
    #[must_use]
    pub fn with_encode_timeout(mut self, encode_timeout: Duration) -> Self {
        self.encode_timeout = encode_timeout;
        self
    }

    /// Returns `true` when the encoder produced the clip in time. A hung
    /// encoder is killed when the timeout drops it.
    async fn encode_test_pattern(&self, out: &Path) -> bool {
        let mut command = Command::new(&self.ffmpeg_program);
        command
            .args([
                "-y",
                "-loglevel",
                "error",
                "-f",
                "lavfi",
                "-i",
                "testsrc=duration=3:size=1280x720:rate=30",
                "-f",
                "lavfi",
                "-i",
                "sine=frequency=1000:duration=3",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-c:a",
                "aac",
                "-shortest",
            ])
            .arg(out)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let Ok(status) = tokio::time::timeout(self.encode_timeout, command.status()).await else {
            warn!(timeout = ?self.encode_timeout, "placeholder encoder timed out");
            return false;
        };

        match status {
            Ok(status) if status.success() => true,
            Ok(status) => {
                warn!(%status, "placeholder encoder failed");
                false
            }
            Err(e) => {
                warn!(program = %self.ffmpeg_program, error = %e, "placeholder encoder unavailable");
                false
            }
        }
    }
}

#[async_trait]
impl RenderTier for PlaceholderTier {
    fn kind(&self) -> RenderTierKind {
        RenderTierKind::Placeholder
    }

    async fn render(&self, request: &RenderRequest) -> Result<PathBuf, PipelineError> {
        tokio::fs::create_dir_all(&self.renders_dir).await?;

        let stem = file_stem_for(request.scene_key().unwrap_or_default());
        let path = self
            .renders_dir
            .join(format!("{stem}_{}.mp4", self.ids.next_id()));

        if self.encode_test_pattern(&path).await {
            info!(path = %path.display(), "created placeholder clip");
            return Ok(path);
        }

        // Truncates anything a failed or killed encoder left behind.
        tokio::fs::write(&path, b"").await?;
        info!(path = %path.display(), "created empty placeholder file");
        Ok(path)
    }
}
