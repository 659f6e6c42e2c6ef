//! Workflow errors
//!
//! There is no `Unsupported` variant: a request outside the closed set of
//! document types is a normal classification outcome, not a failure.

use docflow_templates::TemplateError;

use crate::document_type::DocumentType;
use crate::workflow::WorkflowPhase;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Classification oracle unreachable or erroring; retryable by the caller
    #[error("Classification unavailable: {message}")]
    ClassificationUnavailable { message: String },

    /// `Unsupported` or an unknown type was given where a supported type is required
    #[error("Invalid document type: {0}")]
    InvalidDocumentType(String),

    /// Adequacy oracle failed for a single checklist item
    #[error("Judgment unavailable for '{item}' ({document_type}): {message}")]
    JudgmentUnavailable {
        item: String,
        document_type: DocumentType,
        message: String,
    },

    #[error("Invalid workflow transition: {from} -> {to}")]
    InvalidTransition {
        from: WorkflowPhase,
        to: WorkflowPhase,
    },

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl WorkflowError {
    /// Whether retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WorkflowError::ClassificationUnavailable { .. }
                | WorkflowError::JudgmentUnavailable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        let err = WorkflowError::ClassificationUnavailable {
            message: "timeout".to_string(),
        };
        assert!(err.is_retryable());
        assert!(!WorkflowError::InvalidDocumentType("Unsupported".to_string()).is_retryable());
    }

    #[test]
    fn test_judgment_message_names_item() {
        let err = WorkflowError::JudgmentUnavailable {
            item: "Amount".to_string(),
            document_type: DocumentType::ProductSeminarResultReport,
            message: "quota exceeded".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("Amount"));
        assert!(text.contains("quota exceeded"));
    }
}
