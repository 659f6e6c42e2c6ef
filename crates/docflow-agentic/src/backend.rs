//! Which hosted model provider answers oracle calls

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Env var naming the provider: `openai` or `anthropic`
pub const BACKEND_ENV_VAR: &str = "AGENT_BACKEND";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentBackend {
    #[default]
    OpenAi,
    Anthropic,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown {BACKEND_ENV_VAR} '{0}', expected openai or anthropic")]
pub struct ParseBackendError(String);

impl AgentBackend {
    /// Read `AGENT_BACKEND`; unset means OpenAI, an unknown value is an error
    pub fn from_env() -> Result<Self, ParseBackendError> {
        match std::env::var(BACKEND_ENV_VAR) {
            Ok(value) => value.parse(),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentBackend::OpenAi => "openai",
            AgentBackend::Anthropic => "anthropic",
        }
    }

    /// Env var holding the model override for this provider
    pub fn model_env_var(&self) -> &'static str {
        match self {
            AgentBackend::OpenAi => "OPENAI_MODEL",
            AgentBackend::Anthropic => "ANTHROPIC_MODEL",
        }
    }
}

impl FromStr for AgentBackend {
    type Err = ParseBackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(AgentBackend::OpenAi),
            "anthropic" => Ok(AgentBackend::Anthropic),
            _ => Err(ParseBackendError(s.to_string())),
        }
    }
}

impl std::fmt::Display for AgentBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
