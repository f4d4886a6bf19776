//! Text-completion collaborator abstraction.

use async_trait::async_trait;

use crate::error::PipelineError;

/// Sampling temperature for structured extraction.
pub const EXTRACTION_TEMPERATURE: f32 = 0.1;

/// Sampling temperature for prose explanations.
pub const PROSE_TEMPERATURE: f32 = 0.3;

/// A single system + user completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Fixed instruction describing the task.
    pub system: String,
    /// The user-provided content.
    pub user: String,
    /// Sampling temperature.
    pub temperature: f32,
}

impl CompletionRequest {
    /// Creates a new completion request.
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>, temperature: f32) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature,
        }
    }
}

/// An opaque text-completion service (hosted chat model or local model).
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Short transport name for logging.
    fn name(&self) -> &'static str;

    /// Returns the raw reply text.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::CollaboratorUnavailable` on transport failures
    /// and `PipelineError::MalformedOutput` when the reply envelope cannot be read.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, PipelineError>;
}
