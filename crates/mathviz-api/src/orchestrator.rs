//! Per-request pipeline: refine, render, explain, assemble.

use std::fmt;
use std::path::Path;

use mathviz_core::error::PipelineError;
use mathviz_core::job::{RenderTierKind, VisualizationResponse};
use mathviz_language::{Explainer, Refiner};
use mathviz_render::RenderDispatcher;
use tracing::{error, info, instrument};
use uuid::Uuid;

/// Public prefix under which the renders directory is served.
pub const RENDERS_PREFIX: &str = "/renders/";

/// States a request moves through. Transitions are strictly forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// The prompt has been accepted.
    Received,
    /// A structured job exists.
    Refined,
    /// An artifact path exists.
    Rendered,
    /// An explanation exists.
    Explained,
    /// The response has been built. Terminal.
    Assembled,
}

impl PipelineStage {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Refined => "refined",
            Self::Rendered => "rendered",
            Self::Explained => "explained",
            Self::Assembled => "assembled",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The response plus which render tier produced the artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOutcome {
    /// Body returned to the caller.
    pub response: VisualizationResponse,
    /// Tier that produced the artifact.
    pub tier: RenderTierKind,
}

/// Sequences the stages for one request. Holds no per-request state, so a
/// single instance serves all requests concurrently.
#[derive(Debug)]
pub struct Orchestrator {
    refiner: Refiner,
    dispatcher: RenderDispatcher,
    explainer: Explainer,
}

impl Orchestrator {
    /// Creates an orchestrator from its stages.
    #[must_use]
    pub fn new(refiner: Refiner, dispatcher: RenderDispatcher, explainer: Explainer) -> Self {
        Self {
            refiner,
            dispatcher,
            explainer,
        }
    }

    /// Runs one prompt through the whole pipeline.
    ///
    /// # Errors
    ///
    /// Returns the render dispatcher's error when every tier failed. Nothing
    /// is returned partially.
    #[instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
    pub async fn generate(&self, prompt: &str) -> Result<GenerateOutcome, PipelineError> {
        info!(stage = %PipelineStage::Received, "generate request received");

        let job = self.refiner.refine(prompt).await;
        info!(
            stage = %PipelineStage::Refined,
            visualization_type = %job.visualization_type,
            "prompt refined"
        );

        let render = self
            .dispatcher
            .render(&job.visualization_type, &job.parameters)
            .await
            .inspect_err(|e| error!(error = %e, code = e.code(), "render dispatch aborted"))?;
        info!(
            stage = %PipelineStage::Rendered,
            tier = %render.tier,
            path = %render.artifact_path.display(),
            "artifact ready"
        );

        let explanation = self.explainer.explain(&job, prompt).await;
        info!(stage = %PipelineStage::Explained, "explanation ready");

        let refined_prompt = if job.description.trim().is_empty() {
            prompt.to_owned()
        } else {
            job.description
        };
        let response = VisualizationResponse {
            video_url: public_video_url(&render.artifact_path),
            refined_prompt,
            visualization_type: job.visualization_type,
            explanation,
        };
        info!(stage = %PipelineStage::Assembled, video_url = %response.video_url, "response assembled");

        Ok(GenerateOutcome {
            response,
            tier: render.tier,
        })
    }
}

/// Maps an artifact path to its public URL: `/renders/{file name}`.
#[must_use]
pub fn public_video_url(artifact_path: &Path) -> String {
    let name = artifact_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{RENDERS_PREFIX}{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use mathviz_core::job::StructuredJob;
    use mathviz_test_support::{CannedCompletion, FailingCompletion, FailingTier, TaggedTier};
    use serde_json::json;

    fn offline(dispatcher: RenderDispatcher) -> Orchestrator {
        Orchestrator::new(Refiner::offline(), dispatcher, Explainer::offline())
    }

    fn placeholder_only() -> RenderDispatcher {
        RenderDispatcher::new(vec![], Arc::new(TaggedTier::new(RenderTierKind::Placeholder)))
    }

    #[tokio::test]
    async fn test_fourier_prompt_end_to_end() {
        // Arrange
        let orchestrator = offline(placeholder_only());

        // Act
        let outcome = orchestrator
            .generate("Show me how a Fourier series builds a square wave")
            .await
            .unwrap();

        // Assert
        let response = outcome.response;
        assert_eq!(response.visualization_type, "fourier_series");
        assert_eq!(response.video_url, "/renders/fourier_series.mp4");
        assert_eq!(
            response.refined_prompt,
            "Fourier series approximation of a square wave using odd harmonics"
        );
        assert!(response.explanation.contains("[1, 3, 5, 7, 9]"));
        assert_eq!(outcome.tier, RenderTierKind::Placeholder);
    }

    #[tokio::test]
    async fn test_real_tier_result_is_reported() {
        let orchestrator = offline(RenderDispatcher::new(
            vec![
                Arc::new(FailingTier::recoverable(RenderTierKind::Remote)),
                Arc::new(TaggedTier::new(RenderTierKind::Subprocess)),
            ],
            Arc::new(TaggedTier::new(RenderTierKind::Placeholder)),
        ));

        let outcome = orchestrator
            .generate("Visualize a 2x2 matrix transformation")
            .await
            .unwrap();

        assert_eq!(outcome.tier, RenderTierKind::Subprocess);
        assert_eq!(outcome.response.visualization_type, "linear_transform");
    }

    #[tokio::test]
    async fn test_collaborator_failures_degrade_without_error() {
        let failing: Arc<FailingCompletion> = Arc::new(FailingCompletion);
        let orchestrator = Orchestrator::new(
            Refiner::new(Some(failing.clone())),
            placeholder_only(),
            Explainer::new(Some(failing)),
        );

        let outcome = orchestrator.generate("Draw something pretty").await.unwrap();

        assert_eq!(outcome.response.visualization_type, "function_plot");
        assert!(!outcome.response.explanation.is_empty());
    }

    #[tokio::test]
    async fn test_empty_description_uses_prompt() {
        let reply = serde_json::to_string(&StructuredJob::new(
            "vector",
            serde_json::from_value(json!({ "vector": [1, 2] })).unwrap(),
            "",
        ))
        .unwrap();
        let orchestrator = Orchestrator::new(
            Refiner::new(Some(Arc::new(CannedCompletion::new(reply)))),
            placeholder_only(),
            Explainer::offline(),
        );

        let outcome = orchestrator.generate("draw the vector (1, 2)").await.unwrap();

        assert_eq!(outcome.response.refined_prompt, "draw the vector (1, 2)");
        assert_eq!(outcome.response.explanation, "draw the vector (1, 2)");
    }

    #[tokio::test]
    async fn test_catastrophic_render_aborts_request() {
        let orchestrator = offline(RenderDispatcher::new(
            vec![Arc::new(FailingTier::catastrophic(RenderTierKind::Subprocess))],
            Arc::new(TaggedTier::new(RenderTierKind::Placeholder)),
        ));

        let err = orchestrator.generate("plot x").await.unwrap_err();

        assert!(matches!(err, PipelineError::Catastrophic(_)));
    }

    #[test]
    fn test_public_video_url_uses_file_name_only() {
        assert_eq!(
            public_video_url(Path::new("/var/lib/mathviz/renders/vector_1a2b3c4d.mp4")),
            "/renders/vector_1a2b3c4d.mp4"
        );
        assert_eq!(
            public_video_url(Path::new("renders/plot.mp4")),
            "/renders/plot.mp4"
        );
    }
}
