//! Template lookup seam
//!
//! The workflow only needs "template text for this document type"; where the
//! text comes from is the caller's choice.

use docflow_templates::TemplateRegistry;

use crate::document_type::DocumentType;

pub trait TemplateLookup: Send + Sync {
    fn template_for(&self, document_type: DocumentType) -> Option<String>;
}

impl TemplateLookup for TemplateRegistry {
    fn template_for(&self, document_type: DocumentType) -> Option<String> {
        document_type
            .label()
            .and_then(|label| self.document_information(label))
            .map(|text| text.to_string())
    }
}

/// Lookup that never finds a template
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTemplates;

impl TemplateLookup for NoTemplates {
    fn template_for(&self, _document_type: DocumentType) -> Option<String> {
        None
    }
}
