//! OpenAI Client
//!
//! LLM client implementation for OpenAI API.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::client_factory::ClientSettings;
use super::llm_client::{
    history_messages, ChatMessage, LlmClient, ToolCallResult, ToolDefinition,
};

/// Default OpenAI model
pub const DEFAULT_MODEL: &str = "gpt-4o";

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI API client
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    client: reqwest::Client,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    /// Create a new OpenAI client with the given API key and settings
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
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("OPENAI_API_KEY environment variable not set"))?;
        Self::new(api_key, settings)
    }

    async fn post(&self, body: &serde_json::Value) -> Result<String> {
        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .context("Failed to send OpenAI request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("OpenAI API error {}: {}", status, body));
        }

        Ok(response.text().await?)
    }

    /// Internal API call implementation
    async fn call_api(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_prompt: &str,
    ) -> Result<String> {
        let mut messages = vec![serde_json::json!({"role": "system", "content": system_prompt})];
        messages.extend(history_messages(history, user_prompt));

        let body = serde_json::json!({
            "model": &self.model,
            "messages": messages,
            "temperature": self.temperature
        });

        #[derive(Deserialize)]
        struct Message {
            content: Option<String>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }
        #[derive(Deserialize)]
        struct ApiResponse {
            choices: Vec<Choice>,
        }

        let response_text = self.post(&body).await?;
        let api_response: ApiResponse = serde_json::from_str(&response_text)
            .map_err(|e| anyhow!("Failed to parse OpenAI response: {}", e))?;
        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow!("OpenAI returned no choices"))
    }

    /// Internal API call with function_calling for structured output
    async fn call_api_with_tool(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        tool: &ToolDefinition,
    ) -> Result<ToolCallResult> {
        let body = serde_json::json!({
            "model": &self.model,
            "messages": [
                {"role": "system", "content": system_prompt},
                {"role": "user", "content": user_prompt}
            ],
            "temperature": self.temperature,
            "functions": [{
                "name": &tool.name,
                "description": &tool.description,
                "parameters": &tool.parameters
            }],
            "function_call": {"name": &tool.name}
        });

        // Response format: { "choices": [{ "message": { "function_call": { "name": "...", "arguments": "..." } } }] }
        #[derive(Deserialize)]
        struct FunctionCall {
            name: String,
            arguments: String, // OpenAI returns arguments as a JSON string
        }
        #[derive(Deserialize)]
        struct Message {
            function_call: Option<FunctionCall>,
        }
        #[derive(Deserialize)]
        struct Choice {
            message: Message,
        }
        #[derive(Deserialize)]
        struct ApiResponse {
            choices: Vec<Choice>,
        }

        let response_text = self.post(&body).await?;
        tracing::debug!(
            "OpenAI raw response: {}",
            response_text.chars().take(1000).collect::<String>()
        );

        let api_response: ApiResponse = serde_json::from_str(&response_text)
            .map_err(|e| anyhow!("Failed to parse OpenAI response: {}", e))?;

        let function_call = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.function_call)
            .ok_or_else(|| anyhow!("No function_call in OpenAI response"))?;

        let arguments: serde_json::Value = serde_json::from_str(&function_call.arguments)
            .map_err(|e| anyhow!("Failed to parse function arguments: {}", e))?;

        Ok(ToolCallResult {
            tool_name: function_call.name,
            arguments,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat_with_history(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_prompt: &str,
    ) -> Result<String> {
        self.call_api(system_prompt, history, user_prompt).await
    }

    async fn chat_with_tool(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        tool: &ToolDefinition,
    ) -> Result<ToolCallResult> {
        self.call_api_with_tool(system_prompt, user_prompt, tool)
            .await
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "OpenAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client_uses_default_model() {
        let client = OpenAiClient::new("test-key".to_string(), &ClientSettings::default()).unwrap();
        assert_eq!(client.model_name(), DEFAULT_MODEL);
        assert_eq!(client.provider_name(), "OpenAI");
    }

    #[test]
    fn test_model_override() {
        let settings = ClientSettings {
            model: Some("gpt-4o-mini".to_string()),
            ..Default::default()
        };
        let client = OpenAiClient::new("test-key".to_string(), &settings).unwrap();
        assert_eq!(client.model_name(), "gpt-4o-mini");
    }
}
