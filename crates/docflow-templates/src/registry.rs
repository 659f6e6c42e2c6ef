//! Template Registry - label → template lookup

use std::collections::BTreeMap;
use std::path::Path;

use super::definition::{TemplateDefinition, TemplateFile};
use super::error::TemplateError;

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, TemplateDefinition>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load templates from a YAML file.
    ///
    /// A missing file yields an empty registry (logged); an unreadable or
    /// malformed file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("Template file not found: {}", path.display());
            return Ok(Self::new());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let file: TemplateFile =
            serde_yaml::from_str(&raw).map_err(|source| TemplateError::Parse {
                origin: path.display().to_string(),
                source,
            })?;

        tracing::info!(
            "Loaded {} templates from {}",
            file.templates.len(),
            path.display()
        );
        Ok(Self {
            templates: file.templates,
        })
    }

    /// Parse templates from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TemplateError> {
        let file: TemplateFile =
            serde_yaml::from_str(yaml).map_err(|source| TemplateError::Parse {
                origin: "<inline>".to_string(),
                source,
            })?;
        Ok(Self {
            templates: file.templates,
        })
    }

    pub fn register(&mut self, label: impl Into<String>, template: TemplateDefinition) {
        self.templates.insert(label.into(), template);
    }

    pub fn get(&self, label: &str) -> Option<&TemplateDefinition> {
        self.templates.get(label)
    }

    /// Shortcut for the `document_information` text of a template
    pub fn document_information(&self, label: &str) -> Option<&str> {
        self.get(label).map(|t| t.document_information.as_str())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r###"
templates:
  영업방문 결과보고서:
    description: Sales visit
    document_information: |
      ## 고객사 개요
  제품설명회 시행 신청서:
    document_information: "## 제품설명회 시행 목적"
"###;

    #[test]
    fn test_from_yaml_str() {
        let registry = TemplateRegistry::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.document_information("제품설명회 시행 신청서"),
            Some("## 제품설명회 시행 목적")
        );
        assert_eq!(
            registry.get("영업방문 결과보고서").unwrap().description.as_deref(),
            Some("Sales visit")
        );
        assert!(registry.get("실적분석레포트").is_none());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let registry = TemplateRegistry::load(dir.path().join("absent.yaml")).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let registry = TemplateRegistry::load(file.path()).unwrap();
        let labels: Vec<&str> = registry.labels().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels.contains(&"영업방문 결과보고서"));
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let err = TemplateRegistry::from_yaml_str("templates: [unclosed").unwrap_err();
        assert!(
            matches!(err, TemplateError::Parse { ref origin, .. } if origin == "<inline>")
        );
    }

    #[test]
    fn test_register() {
        let mut registry = TemplateRegistry::new();
        registry.register(
            "제품설명회 시행 결과보고서",
            TemplateDefinition {
                document_information: "## 지급내역".to_string(),
                description: None,
            },
        );
        assert_eq!(
            registry.document_information("제품설명회 시행 결과보고서"),
            Some("## 지급내역")
        );
    }
}
