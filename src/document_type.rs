//! Document Types
//!
//! The closed set of business documents the workflow understands. All string
//! matching against oracle output lives in [`DocumentType::from_label`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Business document category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// 영업방문 결과보고서 - customer visit / sales activity report
    SalesVisitReport,
    /// 제품설명회 시행 신청서 - application to hold a product seminar
    ProductSeminarApplication,
    /// 제품설명회 시행 결과보고서 - report after a product seminar
    ProductSeminarResultReport,
    /// Outside the supported set
    Unsupported,
}

impl DocumentType {
    /// Every supported type, in presentation order
    pub const SUPPORTED: [DocumentType; 3] = [
        DocumentType::SalesVisitReport,
        DocumentType::ProductSeminarApplication,
        DocumentType::ProductSeminarResultReport,
    ];

    /// Canonical business label; the string the classification oracle emits
    /// and the key into the template store
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::SalesVisitReport => Some("영업방문 결과보고서"),
            Self::ProductSeminarApplication => Some("제품설명회 시행 신청서"),
            Self::ProductSeminarResultReport => Some("제품설명회 시행 결과보고서"),
            Self::Unsupported => None,
        }
    }

    /// Short description used in the classification prompt
    pub fn description(&self) -> &'static str {
        match self {
            Self::SalesVisitReport => "고객 방문, 영업 활동 관련",
            Self::ProductSeminarApplication => "제품설명회 진행 계획, 신청 관련",
            Self::ProductSeminarResultReport => "제품설명회 완료 후 결과 보고 관련",
            Self::Unsupported => "지원하지 않는 문서",
        }
    }

    /// Resolve an oracle label by exact match after trimming
    pub fn from_label(raw: &str) -> Option<DocumentType> {
        let label = raw.trim();
        Self::SUPPORTED
            .into_iter()
            .find(|t| t.label() == Some(label))
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SalesVisitReport => "SalesVisitReport",
            Self::ProductSeminarApplication => "ProductSeminarApplication",
            Self::ProductSeminarResultReport => "ProductSeminarResultReport",
            Self::Unsupported => "Unsupported",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown document type: {0}")]
pub struct ParseDocumentTypeError(String);

impl FromStr for DocumentType {
    type Err = ParseDocumentTypeError;

    /// Accepts a canonical label, a variant name, or its snake_case form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(t) = Self::from_label(s) {
            return Ok(t);
        }
        match s.trim().to_lowercase().replace('_', "").as_str() {
            "salesvisitreport" => Ok(Self::SalesVisitReport),
            "productseminarapplication" => Ok(Self::ProductSeminarApplication),
            "productseminarresultreport" => Ok(Self::ProductSeminarResultReport),
            "unsupported" => Ok(Self::Unsupported),
            _ => Err(ParseDocumentTypeError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_exact_after_trim() {
        assert_eq!(
            DocumentType::from_label("  영업방문 결과보고서\n"),
            Some(DocumentType::SalesVisitReport)
        );
        assert_eq!(
            DocumentType::from_label("제품설명회 시행 결과보고서"),
            Some(DocumentType::ProductSeminarResultReport)
        );
        // Near misses do not match
        assert_eq!(DocumentType::from_label("영업 방문 결과보고서"), None);
        assert_eq!(DocumentType::from_label("1. 영업방문 결과보고서"), None);
        assert_eq!(DocumentType::from_label("지원하지 않는 문서 타입입니다."), None);
    }

    #[test]
    fn test_unsupported_has_no_label() {
        assert!(DocumentType::Unsupported.label().is_none());
        assert!(!DocumentType::Unsupported.is_supported());
        assert!(DocumentType::SUPPORTED.iter().all(|t| t.label().is_some()));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "product_seminar_application".parse::<DocumentType>().unwrap(),
            DocumentType::ProductSeminarApplication
        );
        assert_eq!(
            "SalesVisitReport".parse::<DocumentType>().unwrap(),
            DocumentType::SalesVisitReport
        );
        assert_eq!(
            "제품설명회 시행 신청서".parse::<DocumentType>().unwrap(),
            DocumentType::ProductSeminarApplication
        );
        assert!("expense_report".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&DocumentType::ProductSeminarResultReport).unwrap();
        assert_eq!(json, "\"product_seminar_result_report\"");
    }
}
