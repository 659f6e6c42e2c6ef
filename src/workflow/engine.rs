//! Workflow Engine
//!
//! Drives one [`WorkflowState`] from raw request to review outcome:
//! classify, attach the template, resolve the checklist, judge each section.
//! A rejected classification halts in `Unsupported` before any checklist work.

use anyhow::Context;
use docflow_agentic::create_llm_client;
use docflow_templates::TemplateRegistry;
use std::collections::HashMap;
use std::sync::Arc;

use super::state::{WorkflowPhase, WorkflowState};
use crate::checklist::{resolve_checklist, ChecklistSpec};
use crate::classifier::{ClassificationResult, Classifier};
use crate::config::DocflowConfig;
use crate::document_type::DocumentType;
use crate::error::WorkflowError;
use crate::oracle::{
    AdequacyOracle, ClassificationOracle, LlmAdequacyOracle, LlmClassificationOracle,
};
use crate::review::{ReviewPipeline, ReviewSession, DEFAULT_MAX_CONCURRENT_JUDGMENTS};
use crate::templates::{NoTemplates, TemplateLookup};

pub struct DocumentWorkflow {
    classifier: Classifier,
    pipeline: ReviewPipeline,
    templates: Arc<dyn TemplateLookup>,
}

impl DocumentWorkflow {
    pub fn builder(
        classification: Arc<dyn ClassificationOracle>,
        adequacy: Arc<dyn AdequacyOracle>,
    ) -> DocumentWorkflowBuilder {
        DocumentWorkflowBuilder {
            classification,
            adequacy,
            templates: Arc::new(NoTemplates),
            max_concurrent_judgments: DEFAULT_MAX_CONCURRENT_JUDGMENTS,
        }
    }

    /// Wire LLM-backed oracles and the YAML template store from configuration
    pub fn from_config(config: &DocflowConfig) -> anyhow::Result<Self> {
        let client = create_llm_client(config.backend, &config.client_settings())
            .context("Failed to create LLM client")?;
        let templates = TemplateRegistry::load(&config.templates_path)?;

        Ok(Self::builder(
            Arc::new(LlmClassificationOracle::new(client.clone())),
            Arc::new(LlmAdequacyOracle::new(client)),
        )
        .templates(Arc::new(templates))
        .max_concurrent_judgments(config.max_concurrent_judgments)
        .build())
    }

    pub async fn classify(&self, request: &str) -> Result<ClassificationResult, WorkflowError> {
        self.classifier.classify(request).await
    }

    pub fn resolve_checklist(
        &self,
        document_type: DocumentType,
    ) -> Result<ChecklistSpec, WorkflowError> {
        resolve_checklist(document_type)
    }

    /// Review content for an already-known document type
    pub async fn run_review(
        &self,
        document_type: DocumentType,
        content: &HashMap<String, String>,
    ) -> Result<ReviewSession, WorkflowError> {
        self.pipeline.run_review(document_type, content).await
    }

    /// Classify a request and attach its template.
    ///
    /// Ends in `Classified` or `Unsupported`.
    pub async fn start(&self, request: &str) -> Result<WorkflowState, WorkflowError> {
        let mut state = WorkflowState::new(request);
        let classification = self.classifier.classify(request).await?;

        match classification.document_type() {
            Some(document_type) => {
                state.document_type = Some(document_type);
                state.template_content = self.templates.template_for(document_type);
                if state.template_content.is_none() {
                    tracing::warn!("No template registered for {}", document_type);
                }
                state.classification = Some(classification);
                state.transition_to(WorkflowPhase::Classified)?;
            }
            None => {
                state.document_type = Some(DocumentType::Unsupported);
                state.classification = Some(classification);
                state.transition_to(WorkflowPhase::Unsupported)?;
            }
        }

        Ok(state)
    }

    /// Resolve the checklist and review `content` for a classified state
    pub async fn review(
        &self,
        mut state: WorkflowState,
        content: HashMap<String, String>,
    ) -> Result<WorkflowState, WorkflowError> {
        if state.phase != WorkflowPhase::Classified {
            return Err(WorkflowError::InvalidTransition {
                from: state.phase,
                to: WorkflowPhase::ChecklistResolved,
            });
        }
        let document_type = state
            .document_type
            .ok_or_else(|| WorkflowError::InvalidDocumentType("unclassified".to_string()))?;

        let checklist = resolve_checklist(document_type)?;
        state.checklist = Some(checklist.clone());
        state.transition_to(WorkflowPhase::ChecklistResolved)?;

        let mut session = ReviewSession::initialize(&checklist, &content);
        state.content = content;
        state.transition_to(WorkflowPhase::ReviewInProgress)?;

        self.pipeline.judge(&mut session).await;
        let approved = session.summary().is_some_and(|s| s.is_approved());
        state.review = Some(session);
        state.transition_to(WorkflowPhase::ReviewComplete)?;

        tracing::info!(
            "Review of {} complete: {}",
            document_type,
            if approved {
                "approved"
            } else {
                "needs revision"
            }
        );
        Ok(state)
    }

    /// Full workflow: classify, then review unless the request is unsupported
    pub async fn run(
        &self,
        request: &str,
        content: HashMap<String, String>,
    ) -> Result<WorkflowState, WorkflowError> {
        let state = self.start(request).await?;
        if state.is_unsupported() {
            return Ok(state);
        }
        self.review(state, content).await
    }
}

pub struct DocumentWorkflowBuilder {
    classification: Arc<dyn ClassificationOracle>,
    adequacy: Arc<dyn AdequacyOracle>,
    templates: Arc<dyn TemplateLookup>,
    max_concurrent_judgments: usize,
}

impl DocumentWorkflowBuilder {
    pub fn templates(mut self, templates: Arc<dyn TemplateLookup>) -> Self {
        self.templates = templates;
        self
    }

    pub fn max_concurrent_judgments(mut self, max: usize) -> Self {
        self.max_concurrent_judgments = max;
        self
    }

    pub fn build(self) -> DocumentWorkflow {
        DocumentWorkflow {
            classifier: Classifier::new(self.classification),
            pipeline: ReviewPipeline::new(self.adequacy)
                .with_max_concurrent(self.max_concurrent_judgments),
            templates: self.templates,
        }
    }
}
