//! Remote render-service tier.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use mathviz_core::error::PipelineError;
use mathviz_core::job::{RenderRequest, RenderTierKind};
use mathviz_core::tier::RenderTier;
use serde::Deserialize;
use tracing::debug;

/// Body returned by `POST /render`.
#[derive(Debug, Deserialize)]
struct RemoteRenderResponse {
    #[serde(default)]
    video_path: Option<String>,
}

/// Issues one `POST {base_url}/render` per job.
#[derive(Debug, Clone)]
pub struct RemoteTier {
    client: reqwest::Client,
    render_url: String,
}

impl RemoteTier {
    /// Creates a remote tier. `timeout` bounds the whole request; renders are
    /// CPU-bound, so it should be generous.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Catastrophic` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PipelineError::Catastrophic(format!("http client: {e}")))?;
        Ok(Self {
            client,
            render_url: format!("{}/render", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl RenderTier for RemoteTier {
    fn kind(&self) -> RenderTierKind {
        RenderTierKind::Remote
    }

    async fn render(&self, request: &RenderRequest) -> Result<PathBuf, PipelineError> {
        debug!(url = %self.render_url, "calling render service");
        let response = self
            .client
            .post(&self.render_url)
            .json(request)
            .send()
            .await
            .map_err(|e| PipelineError::CollaboratorUnavailable(format!("render service: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(PipelineError::Renderer(format!(
                "render service returned {status}: {reason}"
            )));
        }

        let body: RemoteRenderResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::MalformedOutput(format!("render service body: {e}")))?;

        body.video_path
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| {
                PipelineError::MalformedOutput("render service response missing video_path".into())
            })
    }
}
