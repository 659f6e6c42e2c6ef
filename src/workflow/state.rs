//! Workflow State Types
//!
//! The per-invocation envelope threaded through classification, checklist
//! resolution and review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::checklist::ChecklistSpec;
use crate::classifier::ClassificationResult;
use crate::document_type::DocumentType;
use crate::error::WorkflowError;
use crate::review::{ReviewItem, ReviewSession, ReviewSummary};

/// Phase of one workflow invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    Uninitialized,
    Classified,
    ChecklistResolved,
    ReviewInProgress,
    ReviewComplete,
    /// Request outside the supported set; the workflow halts here
    Unsupported,
}

impl WorkflowPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Classified => "classified",
            Self::ChecklistResolved => "checklist_resolved",
            Self::ReviewInProgress => "review_in_progress",
            Self::ReviewComplete => "review_complete",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ReviewComplete | Self::Unsupported)
    }

    pub fn can_transition_to(&self, target: WorkflowPhase) -> bool {
        use WorkflowPhase::*;
        matches!(
            (self, target),
            (Uninitialized, Classified | Unsupported)
                | (Classified, ChecklistResolved)
                | (ChecklistResolved, ReviewInProgress)
                | (ReviewInProgress, ReviewComplete)
        )
    }
}

impl std::fmt::Display for WorkflowPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record of a phase transition
#[derive(Debug, Clone, Serialize)]
pub struct PhaseTransition {
    pub from: WorkflowPhase,
    pub to: WorkflowPhase,
    pub transitioned_at: DateTime<Utc>,
}

/// One workflow invocation. Owned by a single call and dropped when it returns.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowState {
    pub workflow_id: Uuid,
    pub request: String,
    pub content: HashMap<String, String>,
    pub phase: WorkflowPhase,
    pub classification: Option<ClassificationResult>,
    pub document_type: Option<DocumentType>,
    /// Drafting template for the classified type, if the store has one
    pub template_content: Option<String>,
    pub checklist: Option<ChecklistSpec>,
    pub review: Option<ReviewSession>,
    pub history: Vec<PhaseTransition>,
    pub created_at: DateTime<Utc>,
}

impl WorkflowState {
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            workflow_id: Uuid::new_v4(),
            request: request.into(),
            content: HashMap::new(),
            phase: WorkflowPhase::Uninitialized,
            classification: None,
            document_type: None,
            template_content: None,
            checklist: None,
            review: None,
            history: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Move to `to`, recording the transition; illegal moves leave the state unchanged
    pub fn transition_to(&mut self, to: WorkflowPhase) -> Result<(), WorkflowError> {
        if !self.phase.can_transition_to(to) {
            return Err(WorkflowError::InvalidTransition {
                from: self.phase,
                to,
            });
        }

        let from = std::mem::replace(&mut self.phase, to);
        tracing::debug!("Workflow {}: {} -> {}", self.workflow_id, from, to);
        self.history.push(PhaseTransition {
            from,
            to,
            transitioned_at: Utc::now(),
        });
        Ok(())
    }

    /// Review items, empty until the review phase populates them
    pub fn items(&self) -> &[ReviewItem] {
        self.review
            .as_ref()
            .map(|r| r.items.as_slice())
            .unwrap_or(&[])
    }

    /// Session summary once review has run to completion
    pub fn summary(&self) -> Option<ReviewSummary> {
        self.review.as_ref().and_then(|r| r.summary())
    }

    pub fn is_unsupported(&self) -> bool {
        self.phase == WorkflowPhase::Unsupported
    }
}
