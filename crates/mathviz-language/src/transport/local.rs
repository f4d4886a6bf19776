//! Local generation-server transport.

use std::time::Duration;

use async_trait::async_trait;
use mathviz_core::completion::{CompletionRequest, TextCompletion};
use mathviz_core::error::PipelineError;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Calls `POST {base_url}/api/generate` with a single concatenated prompt.
#[derive(Debug, Clone)]
pub struct LocalGenerateClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl LocalGenerateClient {
    /// Creates a local client.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Catastrophic` if the HTTP client cannot be built.
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self, PipelineError> {
        Ok(Self {
            client: super::http_client(timeout)?,
            endpoint: format!("{}/api/generate", base_url.trim_end_matches('/')),
            model: model.to_owned(),
        })
    }
}

/// Folds system and user text into the single prompt the server expects.
fn concatenate(request: &CompletionRequest) -> String {
    format!("{}\n\nUser: {}\nAssistant:", request.system, request.user)
}

#[async_trait]
impl TextCompletion for LocalGenerateClient {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, PipelineError> {
        let body = GenerateBody {
            model: &self.model,
            prompt: concatenate(request),
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::CollaboratorUnavailable(format!("local model: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::CollaboratorUnavailable(format!(
                "local model returned {status}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::MalformedOutput(format!("local model body: {e}")))?;
        Ok(parsed.response)
    }
}
