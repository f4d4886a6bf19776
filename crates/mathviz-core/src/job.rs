//! Job and result types that flow through the pipeline.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Open, untyped scene parameters. Each scene defines its own keys.
pub type Parameters = Map<String, Value>;

/// A normalized visualization request produced by the refinement stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredJob {
    /// Scene key, ideally one the render backend knows.
    pub visualization_type: String,
    /// Scene parameters.
    #[serde(default)]
    pub parameters: Parameters,
    /// Human-readable description of what will be visualized.
    #[serde(default)]
    pub description: String,
}

impl StructuredJob {
    /// Creates a job from its parts.
    #[must_use]
    pub fn new(
        visualization_type: impl Into<String>,
        parameters: Parameters,
        description: impl Into<String>,
    ) -> Self {
        Self {
            visualization_type: visualization_type.into(),
            parameters,
            description: description.into(),
        }
    }
}

/// Wire shape shared by the render service, the worker request file and the
/// remote tier: `{ "type": ..., "parameters": {...} }`.
///
/// `visualization_type` is accepted as an alias for `type` on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    /// Scene key.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Alternate spelling of `type`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visualization_type: Option<String>,
    /// Scene parameters.
    #[serde(default)]
    pub parameters: Parameters,
}

impl RenderRequest {
    /// Builds the canonical `{type, parameters}` request.
    #[must_use]
    pub fn new(kind: impl Into<String>, parameters: Parameters) -> Self {
        Self {
            kind: Some(kind.into()),
            visualization_type: None,
            parameters,
        }
    }

    /// Returns the requested scene key, preferring `type` over
    /// `visualization_type`. Empty strings count as absent.
    #[must_use]
    pub fn scene_key(&self) -> Option<&str> {
        self.kind
            .as_deref()
            .filter(|k| !k.is_empty())
            .or_else(|| self.visualization_type.as_deref().filter(|k| !k.is_empty()))
    }
}

/// The dispatch tier that produced an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderTierKind {
    /// Remote render service over HTTP.
    Remote,
    /// Local render-worker subprocess.
    Subprocess,
    /// Synthesized placeholder clip or empty file.
    Placeholder,
}

impl RenderTierKind {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Subprocess => "subprocess",
            Self::Placeholder => "placeholder",
        }
    }
}

impl fmt::Display for RenderTierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a dispatch: where the artifact lives and who produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    /// Filesystem path of the produced (or synthesized) media file.
    pub artifact_path: PathBuf,
    /// The tier that produced it.
    pub tier: RenderTierKind,
}

/// The externally visible result of one generate request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationResponse {
    /// Public URL of the artifact, e.g. `/renders/fourier_series_1a2b3c4d.mp4`.
    pub video_url: String,
    /// The job description (or the original prompt when the job has none).
    pub refined_prompt: String,
    /// Scene key the job was routed to.
    pub visualization_type: String,
    /// Prose explanation of the visualization.
    pub explanation: String,
}
