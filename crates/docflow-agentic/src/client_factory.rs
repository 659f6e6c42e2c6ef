//! Client Factory
//!
//! Builds the configured [`LlmClient`] behind an `Arc<dyn LlmClient>`.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

use crate::anthropic_client::AnthropicClient;
use crate::backend::AgentBackend;
use crate::llm_client::LlmClient;
use crate::openai_client::OpenAiClient;

/// Per-client generation and transport settings
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Model override; `None` uses the provider default
    pub model: Option<String>,
    pub temperature: f32,
    /// Applied to every HTTP request; a timeout surfaces as an ordinary error
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.7,
            request_timeout: Duration::from_secs(60),
        }
    }
}

/// Create an LLM client for the given backend, reading the API key from the environment
pub fn create_llm_client(
    backend: AgentBackend,
    settings: &ClientSettings,
) -> Result<Arc<dyn LlmClient>> {
    let client: Arc<dyn LlmClient> = match backend {
        AgentBackend::OpenAi => Arc::new(OpenAiClient::from_env(settings)?),
        AgentBackend::Anthropic => Arc::new(AnthropicClient::from_env(settings)?),
    };

    tracing::info!(
        "Using {} backend with model {}",
        client.provider_name(),
        client.model_name()
    );
    Ok(client)
}
