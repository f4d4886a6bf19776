//! Pipeline error types.

use thiserror::Error;

/// Top-level pipeline error type.
///
/// The first four variants are recovered inside the stage that observes them
/// (by falling through to the next tier or to the offline generator). Only
/// `Catastrophic` is allowed to abort a request.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A collaborator (text completion, render service, worker) could not be reached.
    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    /// A collaborator replied with output that does not match the expected shape.
    #[error("malformed collaborator output: {0}")]
    MalformedOutput(String),

    /// A renderer ran but did not produce an artifact.
    #[error("renderer failure: {0}")]
    Renderer(String),

    /// The requested visualization type is not known to the renderer.
    #[error("unsupported visualization type: {0}")]
    Unsupported(String),

    /// Anything not covered above, e.g. the artifact directory is not writable.
    #[error("catastrophic failure: {0}")]
    Catastrophic(String),
}

impl PipelineError {
    /// Returns `true` when the failure should be absorbed by a fallback.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Catastrophic(_))
    }

    /// Short machine-readable code, used in logs and HTTP error bodies.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::CollaboratorUnavailable(_) => "collaborator_unavailable",
            Self::MalformedOutput(_) => "malformed_output",
            Self::Renderer(_) => "renderer_failure",
            Self::Unsupported(_) => "unsupported_visualization",
            Self::Catastrophic(_) => "catastrophic",
        }
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        Self::Catastrophic(format!("i/o error: {err}"))
    }
}
