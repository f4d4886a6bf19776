//! Refinement stage: free text to structured job.

use std::sync::Arc;

use mathviz_core::completion::{CompletionRequest, EXTRACTION_TEMPERATURE, TextCompletion};
use mathviz_core::error::PipelineError;
use mathviz_core::job::StructuredJob;
use tracing::{debug, instrument, warn};

use crate::domain::classifier::classify;
use crate::domain::prompts::REFINE_SYSTEM_PROMPT;

/// Converts a prompt into a [`StructuredJob`].
///
/// Without a collaborator every prompt goes through the offline classifier.
/// With one, any transport error, unparsable reply or reply lacking a
/// visualization type is logged and answered by the classifier instead.
#[derive(Clone)]
pub struct Refiner {
    completion: Option<Arc<dyn TextCompletion>>,
}

impl std::fmt::Debug for Refiner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Refiner")
            .field("completion", &self.completion.as_ref().map(|c| c.name()))
            .finish()
    }
}

impl Refiner {
    /// Creates a refiner backed by an optional collaborator.
    #[must_use]
    pub fn new(completion: Option<Arc<dyn TextCompletion>>) -> Self {
        Self { completion }
    }

    /// Creates a refiner that only uses the offline classifier.
    #[must_use]
    pub fn offline() -> Self {
        Self { completion: None }
    }

    /// Refines a prompt. Never fails.
    #[instrument(skip_all)]
    pub async fn refine(&self, prompt: &str) -> StructuredJob {
        let Some(completion) = &self.completion else {
            return classify(prompt);
        };

        let request = CompletionRequest::new(REFINE_SYSTEM_PROMPT, prompt, EXTRACTION_TEMPERATURE);
        let outcome = match completion.complete(&request).await {
            Ok(reply) => parse_job(&reply),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(job) => {
                debug!(
                    transport = completion.name(),
                    visualization_type = %job.visualization_type,
                    "prompt refined"
                );
                job
            }
            Err(e) => {
                warn!(
                    transport = completion.name(),
                    error = %e,
                    "refinement failed, using offline classifier"
                );
                classify(prompt)
            }
        }
    }
}

/// Accepts the reply only if it is a JSON object with a non-empty type.
fn parse_job(reply: &str) -> Result<StructuredJob, PipelineError> {
    let job: StructuredJob = serde_json::from_str(strip_code_fence(reply))
        .map_err(|e| PipelineError::MalformedOutput(format!("refinement reply: {e}")))?;
    if job.visualization_type.trim().is_empty() {
        return Err(PipelineError::MalformedOutput(
            "refinement reply has an empty visualization_type".into(),
        ));
    }
    Ok(job)
}

/// Chat models often wrap JSON in a Markdown fence.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.strip_prefix("json").unwrap_or(rest);
    body.strip_suffix("```").unwrap_or(body).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    use mathviz_test_support::{CannedCompletion, FailingCompletion, RecordingCompletion};
    use serde_json::json;

    #[tokio::test]
    async fn test_offline_refiner_classifies_fourier_prompt() {
        let job = Refiner::offline()
            .refine("Show me how a Fourier series builds a square wave")
            .await;

        assert_eq!(job.visualization_type, "fourier_series");
        assert_eq!(job.parameters["terms"], json!([1, 3, 5, 7, 9]));
        assert_eq!(job.parameters["target_function"], "square_wave");
    }

    #[tokio::test]
    async fn test_collaborator_reply_is_used_verbatim() {
        // Arrange
        let reply = r#"{"visualization_type":"vector_field","parameters":{"field":"curl"},"description":"A swirling field"}"#;
        let refiner = Refiner::new(Some(Arc::new(CannedCompletion::new(reply))));

        // Act
        let job = refiner.refine("draw a curl field").await;

        // Assert
        assert_eq!(job.visualization_type, "vector_field");
        assert_eq!(job.parameters["field"], "curl");
        assert_eq!(job.description, "A swirling field");
    }

    #[tokio::test]
    async fn test_fenced_reply_is_accepted() {
        let reply = "```json\n{\"visualization_type\":\"taylor_series\"}\n```";
        let refiner = Refiner::new(Some(Arc::new(CannedCompletion::new(reply))));

        let job = refiner.refine("anything").await;

        assert_eq!(job.visualization_type, "taylor_series");
        assert!(job.parameters.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_collaborator_falls_back() {
        let refiner = Refiner::new(Some(Arc::new(FailingCompletion)));

        let job = refiner.refine("Visualize a 2x2 matrix transformation").await;

        assert_eq!(job.visualization_type, "linear_transform");
    }

    #[tokio::test]
    async fn test_non_json_reply_falls_back() {
        let refiner = Refiner::new(Some(Arc::new(CannedCompletion::new(
            "Sure! Here is your visualization.",
        ))));

        let job = refiner.refine("Draw something pretty").await;

        assert_eq!(job.visualization_type, "function_plot");
        assert_eq!(job.parameters["expression"], "x**2");
    }

    #[tokio::test]
    async fn test_reply_without_type_falls_back() {
        let refiner = Refiner::new(Some(Arc::new(CannedCompletion::new(
            r#"{"visualization_type":"","parameters":{}}"#,
        ))));

        let job = refiner.refine("taylor expansion").await;

        assert_eq!(job.visualization_type, "taylor_series");
    }

    #[tokio::test]
    async fn test_request_uses_extraction_temperature_and_raw_prompt() {
        let recorder = Arc::new(RecordingCompletion::new(
            r#"{"visualization_type":"function_plot"}"#,
        ));
        let refiner = Refiner::new(Some(recorder.clone()));

        refiner.refine("plot sin(x)").await;

        let requests = recorder.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].user, "plot sin(x)");
        assert!((requests[0].temperature - EXTRACTION_TEMPERATURE).abs() < f32::EPSILON);
        assert_eq!(requests[0].system, REFINE_SYSTEM_PROMPT);
    }
}
