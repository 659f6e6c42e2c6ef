//! Anthropic Client
//!
//! LLM client implementation for Anthropic Claude API.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::client_factory::ClientSettings;
use super::llm_client::{
    history_messages, ChatMessage, LlmClient, ToolCallResult, ToolDefinition,
};

/// Default Anthropic model
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic Claude API client
#[derive(Clone)]
pub struct AnthropicClient {
    api_key: String,
    client: reqwest::Client,
    model: String,
    temperature: f32,
}

/// Content block in a messages response; `text` for plain replies,
/// `input` for `tool_use` blocks
#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
    name: Option<String>,
    input: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

impl AnthropicClient {
    /// Create a new Anthropic client with the given API key and settings
    pub fn new(api_key: String, settings: &ClientSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            api_key,
            client,
            model: settings
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: settings.temperature,
        })
    }

    /// Create from environment variables
    pub fn from_env(settings: &ClientSettings) -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| anyhow!("ANTHROPIC_API_KEY environment variable not set"))?;
        Self::new(api_key, settings)
    }

    async fn post(&self, body: &serde_json::Value) -> Result<ApiResponse> {
        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await
            .context("Failed to send Anthropic request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Anthropic API error {}: {}", status, body));
        }

        response
            .json()
            .await
            .context("Failed to parse Anthropic response")
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    async fn chat_with_history(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_prompt: &str,
    ) -> Result<String> {
        let body = serde_json::json!({
            "model": &self.model,
            "max_tokens": 1024,
            "temperature": self.temperature,
            "system": system_prompt,
            "messages": history_messages(history, user_prompt)
        });

        let api_response = self.post(&body).await?;
        api_response
            .content
            .into_iter()
            .find(|c| c.kind == "text")
            .and_then(|c| c.text)
            .ok_or_else(|| anyhow!("Empty response from Anthropic"))
    }

    async fn chat_with_tool(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        tool: &ToolDefinition,
    ) -> Result<ToolCallResult> {
        let body = serde_json::json!({
            "model": &self.model,
            "max_tokens": 1024,
            "temperature": self.temperature,
            "system": system_prompt,
            "messages": [{"role": "user", "content": user_prompt}],
            "tools": [{
                "name": &tool.name,
                "description": &tool.description,
                "input_schema": &tool.parameters
            }],
            "tool_choice": {"type": "tool", "name": &tool.name}
        });

        let api_response = self.post(&body).await?;
        let block = api_response
            .content
            .into_iter()
            .find(|c| c.kind == "tool_use")
            .ok_or_else(|| anyhow!("No tool_use block in Anthropic response"))?;

        Ok(ToolCallResult {
            tool_name: block.name.unwrap_or_else(|| tool.name.clone()),
            arguments: block
                .input
                .ok_or_else(|| anyhow!("tool_use block has no input"))?,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "Anthropic"
    }
}
