//! Hosted chat-completion transport.

use std::time::Duration;

use async_trait::async_trait;
use mathviz_core::completion::{CompletionRequest, TextCompletion};
use mathviz_core::error::PipelineError;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Calls `POST {base_url}/chat/completions` with bearer authentication.
#[derive(Clone)]
pub struct HostedChatClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl std::fmt::Debug for HostedChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostedChatClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl HostedChatClient {
    /// Creates a hosted client.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Catastrophic` if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: &str,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            client: super::http_client(timeout)?,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.to_owned(),
            model: model.to_owned(),
        })
    }
}

#[async_trait]
impl TextCompletion for HostedChatClient {
    fn name(&self) -> &'static str {
        "hosted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, PipelineError> {
        let body = ChatBody {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::CollaboratorUnavailable(format!("chat completion: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::CollaboratorUnavailable(format!(
                "chat completion returned {status}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::MalformedOutput(format!("chat completion body: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PipelineError::MalformedOutput("chat completion had no content".into()))
    }
}
