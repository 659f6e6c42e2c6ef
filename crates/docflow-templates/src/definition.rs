use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level layout of a templates YAML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateFile {
    #[serde(default)]
    pub templates: BTreeMap<String, TemplateDefinition>,
}

/// One document template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    /// Section-by-section guidance shown when drafting the document
    pub document_information: String,
    /// Optional one-line summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
