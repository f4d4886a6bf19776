//! HTTP transports for the text-completion collaborator.

pub mod hosted;
pub mod local;

use std::sync::Arc;

use mathviz_core::completion::TextCompletion;
use mathviz_core::config::{LanguageConfig, ModelMode};
use mathviz_core::error::PipelineError;
use tracing::info;

pub use hosted::HostedChatClient;
pub use local::LocalGenerateClient;

/// Builds the collaborator selected by `config`, or `None` in mock mode.
///
/// # Errors
///
/// Returns `PipelineError::Catastrophic` if the HTTP client cannot be built.
pub fn completion_from_config(
    config: &LanguageConfig,
) -> Result<Option<Arc<dyn TextCompletion>>, PipelineError> {
    let completion: Option<Arc<dyn TextCompletion>> = match &config.mode {
        ModelMode::Mock => None,
        ModelMode::Local { base_url, model } => Some(Arc::new(LocalGenerateClient::new(
            base_url,
            model,
            config.timeout,
        )?)),
        ModelMode::Hosted {
            api_key,
            base_url,
            model,
        } => Some(Arc::new(HostedChatClient::new(
            base_url,
            api_key,
            model,
            config.timeout,
        )?)),
    };
    info!(mode = config.mode.label(), "language collaborator configured");
    Ok(completion)
}

fn http_client(timeout: std::time::Duration) -> Result<reqwest::Client, PipelineError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| PipelineError::Catastrophic(format!("http client: {e}")))
}
