//! Tiered render dispatch.

use std::sync::Arc;

use mathviz_core::config::RenderConfig;
use mathviz_core::error::PipelineError;
use mathviz_core::ids::ArtifactIdSource;
use mathviz_core::job::{Parameters, RenderRequest, RenderResult, RenderTierKind};
use mathviz_core::tier::RenderTier;
use tracing::{info, instrument, warn};

use crate::placeholder::PlaceholderTier;
use crate::remote::RemoteTier;
use crate::subprocess::SubprocessTier;

/// Tries each render tier in priority order and falls back to a placeholder.
///
/// The dispatcher never consults the scene registry: unknown visualization
/// types go through the same chain and the renderer decides what to show.
pub struct RenderDispatcher {
    tiers: Vec<Arc<dyn RenderTier>>,
    placeholder: Arc<dyn RenderTier>,
}

impl std::fmt::Debug for RenderDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tiers: Vec<RenderTierKind> = self.tiers.iter().map(|t| t.kind()).collect();
        f.debug_struct("RenderDispatcher")
            .field("tiers", &tiers)
            .field("placeholder", &self.placeholder.kind())
            .finish()
    }
}

impl RenderDispatcher {
    /// Creates a dispatcher from an explicit tier chain. `placeholder` is
    /// always attempted last.
    #[must_use]
    pub fn new(tiers: Vec<Arc<dyn RenderTier>>, placeholder: Arc<dyn RenderTier>) -> Self {
        Self { tiers, placeholder }
    }

    /// Builds the production chain: the remote tier when a service URL is
    /// configured, then the worker subprocess when a command is configured,
    /// then the placeholder.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Catastrophic` if the HTTP client cannot be built.
    pub fn from_config(
        config: &RenderConfig,
        ids: Arc<dyn ArtifactIdSource>,
    ) -> Result<Self, PipelineError> {
        let mut tiers: Vec<Arc<dyn RenderTier>> = Vec::new();
        if let Some(url) = &config.remote_url {
            tiers.push(Arc::new(RemoteTier::new(url, config.remote_timeout)?));
        }
        if let Some(worker) = &config.worker {
            tiers.push(Arc::new(SubprocessTier::new(
                worker.clone(),
                &config.renders_dir,
            )));
        }
        let placeholder = Arc::new(PlaceholderTier::new(
            &config.renders_dir,
            &config.ffmpeg_program,
            ids,
        ));

        let dispatcher = Self::new(tiers, placeholder);
        info!(?dispatcher, "render dispatcher configured");
        Ok(dispatcher)
    }

    /// Renders a visualization and returns where the artifact landed.
    ///
    /// Recoverable tier failures are logged and the next tier is tried.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Catastrophic` only when a tier reports an
    /// unrecoverable failure or when even the placeholder cannot be written.
    #[instrument(skip(self, parameters))]
    pub async fn render(
        &self,
        visualization_type: &str,
        parameters: &Parameters,
    ) -> Result<RenderResult, PipelineError> {
        let request = RenderRequest::new(visualization_type, parameters.clone());
        let mut failures: Vec<String> = Vec::new();

        for tier in self.tiers.iter().chain(std::iter::once(&self.placeholder)) {
            let kind = tier.kind();
            match tier.render(&request).await {
                Ok(artifact_path) => {
                    if kind == RenderTierKind::Placeholder {
                        warn!(
                            tier = %kind,
                            path = %artifact_path.display(),
                            "serving placeholder artifact instead of a real render"
                        );
                    } else {
                        info!(tier = %kind, path = %artifact_path.display(), "render succeeded");
                    }
                    return Ok(RenderResult {
                        artifact_path,
                        tier: kind,
                    });
                }
                Err(e) if e.is_recoverable() => {
                    warn!(tier = %kind, error = %e, "render tier failed, falling through");
                    failures.push(format!("{kind}: {e}"));
                }
                Err(e) => {
                    warn!(tier = %kind, error = %e, "render tier failed unrecoverably");
                    return Err(e);
                }
            }
        }

        Err(PipelineError::Catastrophic(format!(
            "every render tier failed ({})",
            failures.join("; ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    use mathviz_test_support::{FailingTier, FixedArtifactIds, TaggedTier};

    fn params(value: serde_json::Value) -> Parameters {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_remote_failure_falls_through_to_subprocess_not_placeholder() {
        // Arrange
        let remote = Arc::new(FailingTier::recoverable(RenderTierKind::Remote));
        let subprocess = Arc::new(TaggedTier::new(RenderTierKind::Subprocess));
        let placeholder = Arc::new(TaggedTier::new(RenderTierKind::Placeholder));
        let dispatcher = RenderDispatcher::new(
            vec![remote.clone(), subprocess.clone()],
            placeholder.clone(),
        );

        // Act
        let result = dispatcher
            .render("fourier_series", &params(serde_json::json!({ "terms": [1, 3] })))
            .await
            .unwrap();

        // Assert
        assert_eq!(result.tier, RenderTierKind::Subprocess);
        assert_eq!(
            result.artifact_path,
            PathBuf::from("/tagged/subprocess/fourier_series.mp4")
        );
        assert_eq!(remote.calls(), 1);
        assert_eq!(subprocess.calls(), 1);
        assert_eq!(placeholder.calls(), 0);
    }

    #[tokio::test]
    async fn test_first_successful_tier_short_circuits() {
        let remote = Arc::new(TaggedTier::new(RenderTierKind::Remote));
        let subprocess = Arc::new(TaggedTier::new(RenderTierKind::Subprocess));
        let dispatcher = RenderDispatcher::new(
            vec![remote.clone(), subprocess.clone()],
            Arc::new(TaggedTier::new(RenderTierKind::Placeholder)),
        );

        let result = dispatcher.render("vector", &Parameters::new()).await.unwrap();

        assert_eq!(result.tier, RenderTierKind::Remote);
        assert_eq!(subprocess.calls(), 0);
    }

    #[tokio::test]
    async fn test_all_real_tiers_failing_yields_placeholder() {
        let dispatcher = RenderDispatcher::new(
            vec![
                Arc::new(FailingTier::recoverable(RenderTierKind::Remote)),
                Arc::new(FailingTier::recoverable(RenderTierKind::Subprocess)),
            ],
            Arc::new(TaggedTier::new(RenderTierKind::Placeholder)),
        );

        let result = dispatcher
            .render("not_a_registered_scene", &Parameters::new())
            .await
            .unwrap();

        assert_eq!(result.tier, RenderTierKind::Placeholder);
    }

    #[tokio::test]
    async fn test_catastrophic_tier_failure_aborts() {
        let placeholder = Arc::new(TaggedTier::new(RenderTierKind::Placeholder));
        let dispatcher = RenderDispatcher::new(
            vec![Arc::new(FailingTier::catastrophic(RenderTierKind::Subprocess))],
            placeholder.clone(),
        );

        let err = dispatcher.render("vector", &Parameters::new()).await.unwrap_err();

        assert!(!err.is_recoverable());
        assert_eq!(placeholder.calls(), 0);
    }

    #[tokio::test]
    async fn test_failing_placeholder_is_reported_as_catastrophic() {
        let dispatcher = RenderDispatcher::new(
            vec![],
            Arc::new(FailingTier::recoverable(RenderTierKind::Placeholder)),
        );

        let err = dispatcher.render("vector", &Parameters::new()).await.unwrap_err();

        assert!(matches!(err, PipelineError::Catastrophic(_)));
        assert!(err.to_string().contains("placeholder"));
    }

    #[tokio::test]
    async fn test_from_config_without_remote_or_worker_still_renders() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig {
            remote_url: None,
            remote_timeout: std::time::Duration::from_secs(1),
            worker: None,
            renders_dir: dir.path().to_path_buf(),
            ffmpeg_program: "mathviz-no-such-encoder".into(),
        };
        let dispatcher =
            RenderDispatcher::from_config(&config, Arc::new(FixedArtifactIds("0badf00d"))).unwrap();

        // Act
        let result = dispatcher
            .render("eigenvalue_demo", &params(serde_json::json!({ "matrix": "oops" })))
            .await
            .unwrap();

        // Assert
        assert_eq!(result.tier, RenderTierKind::Placeholder);
        assert_eq!(
            result.artifact_path,
            dir.path().join("eigenvalue_demo_0badf00d.mp4")
        );
        assert!(result.artifact_path.exists());
    }
}
