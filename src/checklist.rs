//! Checklist Resolver
//!
//! Fixed mapping from a supported document type to the ordered sections a
//! submission must contain. The mapping is static and does not consult the
//! template store.

use serde::Serialize;

use crate::document_type::DocumentType;
use crate::error::WorkflowError;

/// One required section of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    /// Display name; the primary key in submitted content maps
    pub name: &'static str,
    /// Compact key used by the originating business forms
    pub source_key: &'static str,
}

const fn item(name: &'static str, source_key: &'static str) -> ChecklistItem {
    ChecklistItem { name, source_key }
}

const SALES_VISIT_REPORT: &[ChecklistItem] = &[
    item("Customer Overview", "고객사개요"),
    item("Project Overview", "프로젝트개요"),
    item("Visit & Discussion Content", "방문및협의내용"),
    item("Future Plan & Schedule", "향후계획및일정"),
    item("Cooperation & Shared Items", "협조사항및공유사항"),
];

const PRODUCT_SEMINAR_APPLICATION: &[ChecklistItem] = &[
    item("Seminar Purpose", "제품설명회시행목적"),
    item("Seminar Main Content", "제품설명회주요내용"),
];

const PRODUCT_SEMINAR_RESULT_REPORT: &[ChecklistItem] = &[
    item("Seminar Purpose", "제품설명회시행목적"),
    item("Seminar Main Content", "제품설명회주요내용"),
    item("Disbursement Details", "지급내역"),
    item("Amount", "금액"),
    item("Per-Person Amount", "1인금액"),
    item("Alcohol", "주류"),
];

/// Ordered required items for exactly one supported document type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistSpec {
    pub document_type: DocumentType,
    items: &'static [ChecklistItem],
}

impl ChecklistSpec {
    pub fn items(&self) -> &'static [ChecklistItem] {
        self.items
    }

    pub fn item_names(&self) -> Vec<&'static str> {
        self.items.iter().map(|i| i.name).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false for a resolved checklist; present for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Resolve the checklist for a document type.
///
/// `Unsupported` is a caller error: an empty checklist would be
/// indistinguishable from a type with nothing to review.
pub fn resolve_checklist(document_type: DocumentType) -> Result<ChecklistSpec, WorkflowError> {
    let items = match document_type {
        DocumentType::SalesVisitReport => SALES_VISIT_REPORT,
        DocumentType::ProductSeminarApplication => PRODUCT_SEMINAR_APPLICATION,
        DocumentType::ProductSeminarResultReport => PRODUCT_SEMINAR_RESULT_REPORT,
        DocumentType::Unsupported => {
            return Err(WorkflowError::InvalidDocumentType(
                document_type.to_string(),
            ))
        }
    };

    tracing::debug!("Resolved {} checklist items for {}", items.len(), document_type);
    Ok(ChecklistSpec {
        document_type,
        items,
    })
}
