//! Oracles
//!
//! The workflow consumes two external judgment capabilities: one that labels a
//! free-text request and one that judges whether a section's content is
//! adequate. Both are traits so tests and callers can substitute their own;
//! the `Llm*` implementations delegate to a hosted model via [`LlmClient`].

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use docflow_agentic::{ChatMessage, LlmClient, ToolDefinition};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::document_type::DocumentType;

/// A worked example shown to the classification oracle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FewShotExample {
    pub request: String,
    pub label: String,
}

impl FewShotExample {
    pub fn new(request: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            label: label.into(),
        }
    }
}

/// Everything the classification oracle sees for one request
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationPrompt {
    pub instructions: String,
    pub examples: Vec<FewShotExample>,
    pub request: String,
}

#[async_trait]
pub trait ClassificationOracle: Send + Sync {
    /// Return the oracle's free-text label for the prompt's request
    async fn classify(&self, prompt: &ClassificationPrompt) -> Result<String>;
}

/// One section submitted for adequacy judgment
#[derive(Debug, Clone, Serialize)]
pub struct JudgmentRequest {
    pub item_name: String,
    pub content: String,
    pub document_type: DocumentType,
}

/// Structured adequacy verdict
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub adequate: bool,
    pub rationale: String,
}

#[async_trait]
pub trait AdequacyOracle: Send + Sync {
    async fn judge(&self, request: &JudgmentRequest) -> Result<Verdict>;
}

/// Classification oracle backed by a chat model; few-shot examples are sent
/// as prior user/assistant turns
pub struct LlmClassificationOracle {
    client: Arc<dyn LlmClient>,
}

impl LlmClassificationOracle {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClassificationOracle for LlmClassificationOracle {
    async fn classify(&self, prompt: &ClassificationPrompt) -> Result<String> {
        let history: Vec<ChatMessage> = prompt
            .examples
            .iter()
            .flat_map(|e| {
                [
                    ChatMessage::user(e.request.clone()),
                    ChatMessage::assistant(e.label.clone()),
                ]
            })
            .collect();

        tracing::debug!(
            "Classifying via {} ({})",
            self.client.provider_name(),
            self.client.model_name()
        );
        self.client
            .chat_with_history(&prompt.instructions, &history, &prompt.request)
            .await
    }
}

const VERDICT_TOOL_NAME: &str = "submit_verdict";

const JUDGMENT_SYSTEM_PROMPT: &str = r#"You are a compliance reviewer for internal business documents.
You are given one section of a document, the section name and the document type.
Decide whether the section content adequately covers what that section requires.
Content that is vague, off-topic, placeholder text, or missing key facts is NOT adequate.
Always answer by calling the submit_verdict tool. Write the rationale in the same language as the content."#;

/// Adequacy oracle backed by a chat model, forced to answer via a tool call
pub struct LlmAdequacyOracle {
    client: Arc<dyn LlmClient>,
}

impl LlmAdequacyOracle {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    fn verdict_tool() -> ToolDefinition {
        ToolDefinition {
            name: VERDICT_TOOL_NAME.to_string(),
            description: "Submit the adequacy verdict for one document section".to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "adequate": {
                        "type": "boolean",
                        "description": "true if the section content is adequate"
                    },
                    "rationale": {
                        "type": "string",
                        "description": "Short justification of the verdict"
                    }
                },
                "required": ["adequate", "rationale"]
            }),
        }
    }

    fn user_prompt(request: &JudgmentRequest) -> String {
        format!(
            "## Document type\n{}\n\n## Section\n{}\n\n## Content\n{}",
            request
                .document_type
                .label()
                .unwrap_or(request.document_type.name()),
            request.item_name,
            request.content
        )
    }
}

#[async_trait]
impl AdequacyOracle for LlmAdequacyOracle {
    async fn judge(&self, request: &JudgmentRequest) -> Result<Verdict> {
        let result = self
            .client
            .chat_with_tool(
                JUDGMENT_SYSTEM_PROMPT,
                &Self::user_prompt(request),
                &Self::verdict_tool(),
            )
            .await?;

        if result.tool_name != VERDICT_TOOL_NAME {
            return Err(anyhow!("Unexpected tool call: {}", result.tool_name));
        }
        serde_json::from_value(result.arguments)
            .map_err(|e| anyhow!("Malformed verdict for '{}': {}", request.item_name, e))
    }
}
