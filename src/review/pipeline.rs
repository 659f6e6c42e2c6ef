//! Review Pipeline
//!
//! Runs adequacy judgments for every pending item of a session. Items are
//! independent, so judgments run concurrently up to a fixed fan-out and are
//! joined before the session is summarized. The futures are polled in place
//! rather than spawned: dropping `judge` abandons any in-flight oracle calls.

use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

use super::session::ReviewSession;
use crate::checklist::resolve_checklist;
use crate::document_type::DocumentType;
use crate::error::WorkflowError;
use crate::oracle::AdequacyOracle;

/// Default number of concurrent adequacy judgments
pub const DEFAULT_MAX_CONCURRENT_JUDGMENTS: usize = 4;

pub struct ReviewPipeline {
    oracle: Arc<dyn AdequacyOracle>,
    max_concurrent: usize,
}

impl ReviewPipeline {
    pub fn new(oracle: Arc<dyn AdequacyOracle>) -> Self {
        Self {
            oracle,
            max_concurrent: DEFAULT_MAX_CONCURRENT_JUDGMENTS,
        }
    }

    /// Bound concurrent oracle calls; values below 1 are raised to 1
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Initialize a session for a supported document type
    pub fn initialize(
        &self,
        document_type: DocumentType,
        content: &HashMap<String, String>,
    ) -> Result<ReviewSession, WorkflowError> {
        let checklist = resolve_checklist(document_type)?;
        Ok(ReviewSession::initialize(&checklist, content))
    }

    /// Judge every pending item. Oracle failures mark the affected item as
    /// failed and never abort the remaining judgments.
    pub async fn judge(&self, session: &mut ReviewSession) {
        let pending = session.pending_requests();
        if pending.is_empty() {
            return;
        }

        tracing::info!(
            "Judging {} of {} items for {} (max {} concurrent)",
            pending.len(),
            session.items.len(),
            session.document_type,
            self.max_concurrent
        );

        let semaphore = Semaphore::new(self.max_concurrent);
        let semaphore = &semaphore;
        let oracle = &self.oracle;

        let judgments = pending.into_iter().map(|(index, request)| async move {
            let outcome = match semaphore.acquire().await {
                Ok(_permit) => oracle.judge(&request).await,
                Err(e) => Err(anyhow::anyhow!("judgment slot unavailable: {}", e)),
            };
            (index, outcome)
        });

        for (index, outcome) in join_all(judgments).await {
            match outcome {
                Ok(verdict) => session.record_verdict(index, verdict),
                Err(e) => session.record_failure(index, format!("{:#}", e)),
            }
        }
    }

    /// Initialize and judge in one call
    pub async fn run_review(
        &self,
        document_type: DocumentType,
        content: &HashMap<String, String>,
    ) -> Result<ReviewSession, WorkflowError> {
        let mut session = self.initialize(document_type, content)?;
        self.judge(&mut session).await;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::{JudgmentRequest, Verdict};
    use crate::review::{ReviewStatus, ReviewSummary};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Passes everything except items named in `fail_on`, tracking peak concurrency
    #[derive(Default)]
    struct CountingOracle {
        fail_on: Option<&'static str>,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    #[async_trait]
    impl AdequacyOracle for CountingOracle {
        async fn judge(&self, request: &JudgmentRequest) -> anyhow::Result<Verdict> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail_on == Some(request.item_name.as_str()) {
                anyhow::bail!("upstream 503");
            }
            Ok(Verdict {
                adequate: true,
                rationale: "ok".to_string(),
            })
        }
    }

    fn full_result_report() -> HashMap<String, String> {
        [
            ("Seminar Purpose", "신제품 소개"),
            ("Seminar Main Content", "제품 시연 및 Q&A"),
            ("Disbursement Details", "식대"),
            ("Amount", "300,000원"),
            ("Per-Person Amount", "30,000원"),
            ("Alcohol", "없음"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[tokio::test]
    async fn test_all_pass_is_approved() {
        let oracle = Arc::new(CountingOracle::default());
        let pipeline = ReviewPipeline::new(oracle.clone());

        let session = pipeline
            .run_review(DocumentType::ProductSeminarResultReport, &full_result_report())
            .await
            .unwrap();

        assert!(session.is_complete());
        assert_eq!(session.summary(), Some(ReviewSummary::Approved));
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_fan_out_is_bounded() {
        let oracle = Arc::new(CountingOracle::default());
        let pipeline = ReviewPipeline::new(oracle.clone()).with_max_concurrent(2);

        pipeline
            .run_review(DocumentType::ProductSeminarResultReport, &full_result_report())
            .await
            .unwrap();

        assert!(oracle.peak.load(Ordering::SeqCst) <= 2);
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_block_others() {
        let oracle = Arc::new(CountingOracle {
            fail_on: Some("Amount"),
            ..Default::default()
        });
        let pipeline = ReviewPipeline::new(oracle);

        let session = pipeline
            .run_review(DocumentType::ProductSeminarResultReport, &full_result_report())
            .await
            .unwrap();

        assert!(session.is_complete());
        assert_eq!(session.item("Amount").unwrap().status, ReviewStatus::Fail);
        let passed = session
            .items
            .iter()
            .filter(|i| i.status == ReviewStatus::Pass)
            .count();
        assert_eq!(passed, 5);
        assert_eq!(session.judgment_failures.len(), 1);
        assert_eq!(session.judgment_failures[0].item, "Amount");
    }

    #[tokio::test]
    async fn test_unsupported_is_invalid() {
        let pipeline = ReviewPipeline::new(Arc::new(CountingOracle::default()));
        let err = pipeline
            .run_review(DocumentType::Unsupported, &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidDocumentType(_)));
    }

    #[test]
    fn test_zero_concurrency_is_raised() {
        let pipeline =
            ReviewPipeline::new(Arc::new(CountingOracle::default())).with_max_concurrent(0);
        assert_eq!(pipeline.max_concurrent(), 1);
    }
}
