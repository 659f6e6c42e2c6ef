//! LLM client layer for document workflows
//!
//! Provider-neutral access to hosted chat models. The workflow crate builds its
//! classification and adequacy oracles on top of [`LlmClient`]; nothing here
//! knows about document types or checklists.
//!
//! ## Backend Selection
//!
//! Set `AGENT_BACKEND` environment variable:
//! - `openai` (default): OpenAI API
//! - `anthropic`: Anthropic Claude API

pub mod anthropic_client;
pub mod backend;
pub mod client_factory;
pub mod llm_client;
pub mod openai_client;

pub use backend::AgentBackend;
pub use client_factory::{create_llm_client, ClientSettings};
pub use llm_client::{ChatMessage, ChatRole, LlmClient, ToolCallResult, ToolDefinition};
