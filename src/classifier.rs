//! Classifier
//!
//! Maps a free-text request to exactly one supported [`DocumentType`] or an
//! explicit rejection. Natural-language understanding is delegated to a
//! [`ClassificationOracle`]; this module owns the prompt and the strict
//! resolution of the oracle's answer.

use serde::Serialize;
use std::sync::Arc;

use crate::document_type::DocumentType;
use crate::error::WorkflowError;
use crate::oracle::{ClassificationOracle, ClassificationPrompt, FewShotExample};

/// Oracle answer for requests outside the supported set
pub const UNSUPPORTED_LABEL: &str = "지원하지 않는 문서 타입입니다.";

/// Outcome of classifying one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ClassificationResult {
    Classified { document_type: DocumentType },
    /// Not a supported document; `raw_label` is the oracle output verbatim
    Rejected { raw_label: String },
}

impl ClassificationResult {
    pub fn document_type(&self) -> Option<DocumentType> {
        match self {
            ClassificationResult::Classified { document_type } => Some(*document_type),
            ClassificationResult::Rejected { .. } => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ClassificationResult::Rejected { .. })
    }
}

pub struct Classifier {
    oracle: Arc<dyn ClassificationOracle>,
}

impl Classifier {
    pub fn new(oracle: Arc<dyn ClassificationOracle>) -> Self {
        Self { oracle }
    }

    /// Classify a request.
    ///
    /// Blank input is rejected without an oracle call. Oracle failures, including
    /// an empty answer, surface as `ClassificationUnavailable`.
    pub async fn classify(&self, request: &str) -> Result<ClassificationResult, WorkflowError> {
        if request.trim().is_empty() {
            tracing::info!("Blank request rejected without classification");
            return Ok(ClassificationResult::Rejected {
                raw_label: String::new(),
            });
        }

        let prompt = Self::build_prompt(request);
        let label = self.oracle.classify(&prompt).await.map_err(|e| {
            tracing::warn!("Classification oracle failed: {:#}", e);
            WorkflowError::ClassificationUnavailable {
                message: format!("{:#}", e),
            }
        })?;

        if label.trim().is_empty() {
            return Err(WorkflowError::ClassificationUnavailable {
                message: "oracle returned an empty label".to_string(),
            });
        }

        let result = Self::resolve(&label);
        match &result {
            ClassificationResult::Classified { document_type } => {
                tracing::info!("Classified document type: {} ({})", document_type, label.trim())
            }
            ClassificationResult::Rejected { raw_label } => {
                tracing::info!("Request rejected, oracle answered: {}", raw_label)
            }
        }
        Ok(result)
    }

    /// Strict mapping from oracle output to a result
    pub fn resolve(label: &str) -> ClassificationResult {
        match DocumentType::from_label(label) {
            Some(document_type) => ClassificationResult::Classified { document_type },
            None => ClassificationResult::Rejected {
                raw_label: label.to_string(),
            },
        }
    }

    pub fn build_prompt(request: &str) -> ClassificationPrompt {
        let catalogue: String = DocumentType::SUPPORTED
            .iter()
            .enumerate()
            .map(|(i, t)| {
                format!(
                    "{}. {} - {}\n",
                    i + 1,
                    t.label().unwrap_or_default(),
                    t.description()
                )
            })
            .collect();

        let instructions = format!(
            "사용자의 요청을 분석하여 다음 문서 타입 중 하나로 분류해주세요:\n{}\n\
             반드시 위 {}가지 중 하나의 정확한 문서 타입 이름만 응답해주세요.\n\
             앞에 숫자는 제거하고 문서명만 출력하세요.\n\
             지원하지 않는 문서라면 \"{}\"라고 응답하세요.",
            catalogue,
            DocumentType::SUPPORTED.len(),
            UNSUPPORTED_LABEL
        );

        ClassificationPrompt {
            instructions,
            examples: Self::few_shot_examples(),
            request: request.to_string(),
        }
    }

    fn few_shot_examples() -> Vec<FewShotExample> {
        vec![
            FewShotExample::new(
                "영업 방문 결과보고서를 작성해줘",
                DocumentType::SalesVisitReport.label().unwrap_or_default(),
            ),
            FewShotExample::new("실적분석레포트를 작성해줘", UNSUPPORTED_LABEL),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedOracle {
        answer: Option<String>,
        calls: AtomicUsize,
    }

    impl FixedOracle {
        fn answering(answer: &str) -> Arc<Self> {
            Arc::new(Self {
                answer: Some(answer.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                answer: None,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl ClassificationOracle for FixedOracle {
        async fn classify(&self, _prompt: &ClassificationPrompt) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone().ok_or_else(|| anyhow!("connection reset"))
        }
    }

    #[tokio::test]
    async fn test_sales_visit_report() {
        let oracle = FixedOracle::answering("영업방문 결과보고서");
        let classifier = Classifier::new(oracle.clone());

        let result = classifier
            .classify("영업 방문 결과보고서를 작성해줘")
            .await
            .unwrap();
        assert_eq!(
            result,
            ClassificationResult::Classified {
                document_type: DocumentType::SalesVisitReport
            }
        );
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unsupported_answer_is_rejected_verbatim() {
        let classifier = Classifier::new(FixedOracle::answering(UNSUPPORTED_LABEL));
        let result = classifier.classify("실적분석레포트를 작성해줘").await.unwrap();
        assert_eq!(
            result,
            ClassificationResult::Rejected {
                raw_label: UNSUPPORTED_LABEL.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_blank_request_skips_oracle() {
        let oracle = FixedOracle::answering("영업방문 결과보고서");
        let classifier = Classifier::new(oracle.clone());
        let result = classifier.classify("   \n").await.unwrap();
        assert!(result.is_rejected());
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_oracle_failure_is_unavailable_not_unsupported() {
        let classifier = Classifier::new(FixedOracle::failing());
        let err = classifier.classify("제품설명회 신청서").await.unwrap_err();
        assert!(matches!(err, WorkflowError::ClassificationUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_empty_answer_is_unavailable() {
        let classifier = Classifier::new(FixedOracle::answering("  "));
        let err = classifier.classify("제품설명회 신청서").await.unwrap_err();
        assert!(matches!(err, WorkflowError::ClassificationUnavailable { .. }));
    }

    #[test]
    fn test_prompt_lists_all_labels_and_examples() {
        let prompt = Classifier::build_prompt("요청");
        for t in DocumentType::SUPPORTED {
            assert!(prompt.instructions.contains(t.label().unwrap()));
        }
        assert_eq!(prompt.examples.len(), 2);
        assert_eq!(prompt.examples[1].label, UNSUPPORTED_LABEL);
        assert_eq!(prompt.request, "요청");
    }

    #[test]
    fn test_resolve_trims() {
        assert_eq!(
            Classifier::resolve(" 제품설명회 시행 신청서 ").document_type(),
            Some(DocumentType::ProductSeminarApplication)
        );
    }
}
