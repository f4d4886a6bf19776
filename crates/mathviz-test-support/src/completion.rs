//! Test completions: mock `TextCompletion` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use mathviz_core::completion::{CompletionRequest, TextCompletion};
use mathviz_core::error::PipelineError;

/// A completion that always replies with the same text.
#[derive(Debug, Clone)]
pub struct CannedCompletion(pub String);

impl CannedCompletion {
    /// Creates a canned completion.
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self(reply.into())
    }
}

#[async_trait]
impl TextCompletion for CannedCompletion {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String, PipelineError> {
        Ok(self.0.clone())
    }
}

/// A completion that is always unreachable. Useful for testing fallbacks.
#[derive(Debug, Clone, Copy)]
pub struct FailingCompletion;

#[async_trait]
impl TextCompletion for FailingCompletion {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String, PipelineError> {
        Err(PipelineError::CollaboratorUnavailable(
            "connection refused".into(),
        ))
    }
}

/// A completion that records every request and replies with fixed text.
#[derive(Debug)]
pub struct RecordingCompletion {
    reply: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl RecordingCompletion {
    /// Creates a recording completion that answers with `reply`.
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of the recorded requests.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextCompletion for RecordingCompletion {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, PipelineError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.reply.clone())
    }
}
