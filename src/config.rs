//! Configuration
//!
//! Loaded from environment variables (after `.env`) or a YAML file. Every
//! field has a default so an empty environment still yields a usable config.

use anyhow::{Context, Result};
use docflow_agentic::{AgentBackend, ClientSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::review::DEFAULT_MAX_CONCURRENT_JUDGMENTS;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocflowConfig {
    pub backend: AgentBackend,
    /// Model override; `None` uses the backend's default
    pub model: Option<String>,
    pub temperature: f32,
    pub max_concurrent_judgments: usize,
    pub request_timeout_secs: u64,
    pub templates_path: PathBuf,
}

impl Default for DocflowConfig {
    fn default() -> Self {
        Self {
            backend: AgentBackend::default(),
            model: None,
            temperature: 0.7,
            max_concurrent_judgments: DEFAULT_MAX_CONCURRENT_JUDGMENTS,
            request_timeout_secs: 60,
            templates_path: PathBuf::from("config/templates.yaml"),
        }
    }
}

impl DocflowConfig {
    /// Build from environment variables
    ///
    /// - `AGENT_BACKEND`: openai (default) | anthropic
    /// - `OPENAI_MODEL` / `ANTHROPIC_MODEL`
    /// - `DOCFLOW_TEMPERATURE`, `DOCFLOW_MAX_CONCURRENT_JUDGMENTS`,
    ///   `DOCFLOW_REQUEST_TIMEOUT_SECS`, `DOCFLOW_TEMPLATES`
    pub fn from_env() -> Result<Self> {
        let mut config = Self {
            backend: AgentBackend::from_env()?,
            ..Default::default()
        };

        config.model = std::env::var(config.backend.model_env_var()).ok();

        if let Ok(value) = std::env::var("DOCFLOW_TEMPERATURE") {
            config.temperature = value
                .parse()
                .with_context(|| format!("Invalid DOCFLOW_TEMPERATURE '{}'", value))?;
        }
        if let Ok(value) = std::env::var("DOCFLOW_MAX_CONCURRENT_JUDGMENTS") {
            config.max_concurrent_judgments = value
                .parse()
                .with_context(|| format!("Invalid DOCFLOW_MAX_CONCURRENT_JUDGMENTS '{}'", value))?;
        }
        if let Ok(value) = std::env::var("DOCFLOW_REQUEST_TIMEOUT_SECS") {
            config.request_timeout_secs = value
                .parse()
                .with_context(|| format!("Invalid DOCFLOW_REQUEST_TIMEOUT_SECS '{}'", value))?;
        }
        if let Ok(value) = std::env::var("DOCFLOW_TEMPLATES") {
            config.templates_path = PathBuf::from(value);
        }

        Ok(config.normalized())
    }

    /// Load from a YAML file; missing keys take their defaults
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config.normalized())
    }

    fn normalized(mut self) -> Self {
        self.max_concurrent_judgments = self.max_concurrent_judgments.max(1);
        self
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            model: self.model.clone(),
            temperature: self.temperature,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DocflowConfig::default();
        assert_eq!(config.backend, AgentBackend::OpenAi);
        assert_eq!(config.max_concurrent_judgments, 4);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(config.templates_path, PathBuf::from("config/templates.yaml"));
    }

    #[test]
    fn test_yaml_partial_override() {
        let config = DocflowConfig::from_yaml_str(
            "backend: anthropic\nmax_concurrent_judgments: 0\nrequest_timeout_secs: 15\n",
        )
        .unwrap();
        assert_eq!(config.backend, AgentBackend::Anthropic);
        assert_eq!(config.max_concurrent_judgments, 1);
        assert_eq!(
            config.client_settings().request_timeout,
            Duration::from_secs(15)
        );
        assert!(config.model.is_none());
    }

    #[test]
    fn test_yaml_rejects_unknown_backend() {
        assert!(DocflowConfig::from_yaml_str("backend: gemini\n").is_err());
    }
}
