//! Explanation stage: structured job to prose.

use std::sync::Arc;

use mathviz_core::completion::{CompletionRequest, PROSE_TEMPERATURE, TextCompletion};
use mathviz_core::job::StructuredJob;
use serde_json::json;
use tracing::{instrument, warn};

use crate::domain::canned::canned_explanation;
use crate::domain::prompts::EXPLAIN_SYSTEM_PROMPT;

/// Explains a [`StructuredJob`] in a short paragraph.
#[derive(Clone)]
pub struct Explainer {
    completion: Option<Arc<dyn TextCompletion>>,
}

impl std::fmt::Debug for Explainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explainer")
            .field("completion", &self.completion.as_ref().map(|c| c.name()))
            .finish()
    }
}

impl Explainer {
    /// Creates an explainer backed by an optional collaborator.
    #[must_use]
    pub fn new(completion: Option<Arc<dyn TextCompletion>>) -> Self {
        Self { completion }
    }

    /// Creates an explainer that only uses canned text.
    #[must_use]
    pub fn offline() -> Self {
        Self { completion: None }
    }

    /// Explains `job`. The original prompt stands in for an empty
    /// description. Never fails; errors and blank replies yield canned text.
    #[instrument(skip_all, fields(visualization_type = %job.visualization_type))]
    pub async fn explain(&self, job: &StructuredJob, prompt: &str) -> String {
        let description = if job.description.trim().is_empty() {
            prompt
        } else {
            job.description.as_str()
        };
        let fallback = || canned_explanation(&job.visualization_type, &job.parameters, description);

        let Some(completion) = &self.completion else {
            return fallback();
        };

        let instruction = json!({
            "visualization_type": job.visualization_type,
            "parameters": job.parameters,
            "description": description,
        })
        .to_string();
        let request = CompletionRequest::new(EXPLAIN_SYSTEM_PROMPT, instruction, PROSE_TEMPERATURE);

        match completion.complete(&request).await {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_owned(),
            Ok(_) => {
                warn!(transport = completion.name(), "empty explanation, using canned text");
                fallback()
            }
            Err(e) => {
                warn!(
                    transport = completion.name(),
                    error = %e,
                    "explanation failed, using canned text"
                );
                fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use mathviz_core::job::Parameters;
    use mathviz_test_support::{CannedCompletion, FailingCompletion, RecordingCompletion};
    use serde_json::Value;

    fn job(kind: &str, parameters: Value, description: &str) -> StructuredJob {
        StructuredJob::new(kind, serde_json::from_value(parameters).unwrap(), description)
    }

    #[tokio::test]
    async fn test_offline_explainer_echoes_fourier_terms() {
        let job = job("fourier_series", json!({ "terms": [1, 3, 5] }), "");

        let text = Explainer::offline().explain(&job, "fourier please").await;

        assert!(text.contains("[1, 3, 5]"));
    }

    #[tokio::test]
    async fn test_collaborator_reply_is_trimmed() {
        let explainer = Explainer::new(Some(Arc::new(CannedCompletion::new(
            "  A parabola opens upward.\n",
        ))));

        let text = explainer
            .explain(&job("function_plot", json!({}), ""), "plot x^2")
            .await;

        assert_eq!(text, "A parabola opens upward.");
    }

    #[tokio::test]
    async fn test_unreachable_collaborator_falls_back_to_canned_text() {
        let explainer = Explainer::new(Some(Arc::new(FailingCompletion)));
        let job = job("function_plot", json!({ "expression": "x**3" }), "");

        let text = explainer.explain(&job, "plot cubes").await;

        assert!(text.contains("x**3"));
    }

    #[tokio::test]
    async fn test_blank_reply_falls_back_to_prompt_for_unknown_type() {
        let explainer = Explainer::new(Some(Arc::new(CannedCompletion::new("   "))));
        let job = StructuredJob::new("knot_diagram", Parameters::new(), "");

        let text = explainer.explain(&job, "draw a trefoil knot").await;

        assert_eq!(text, "draw a trefoil knot");
    }

    #[tokio::test]
    async fn test_instruction_carries_job_as_json() {
        // Arrange
        let recorder = Arc::new(RecordingCompletion::new("fine"));
        let explainer = Explainer::new(Some(recorder.clone()));
        let job = job("taylor_series", json!({ "terms": 5 }), "");

        // Act
        explainer.explain(&job, "taylor of exp").await;

        // Assert
        let requests = recorder.requests();
        let sent: Value = serde_json::from_str(&requests[0].user).unwrap();
        assert_eq!(sent["visualization_type"], "taylor_series");
        assert_eq!(sent["parameters"]["terms"], 5);
        assert_eq!(sent["description"], "taylor of exp");
        assert!((requests[0].temperature - PROSE_TEMPERATURE).abs() < f32::EPSILON);
    }
}
