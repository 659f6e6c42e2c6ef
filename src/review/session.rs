//! Review Session
//!
//! Per-document review state: one item per checklist entry, plus the record of
//! any judgment the oracle could not deliver.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

use super::item::{ReviewItem, ReviewStatus};
use crate::checklist::ChecklistSpec;
use crate::document_type::DocumentType;
use crate::error::WorkflowError;
use crate::oracle::{JudgmentRequest, Verdict};

/// Rationale recorded on an item whose judgment could not be obtained
pub const JUDGMENT_UNAVAILABLE: &str = "judgment unavailable";

/// An adequacy-oracle failure for one item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JudgmentFailure {
    pub item: String,
    pub document_type: DocumentType,
    pub message: String,
}

impl From<&JudgmentFailure> for WorkflowError {
    fn from(failure: &JudgmentFailure) -> Self {
        WorkflowError::JudgmentUnavailable {
            item: failure.item.clone(),
            document_type: failure.document_type,
            message: failure.message.clone(),
        }
    }
}

/// Item reported back to the author for revision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevisionItem {
    pub name: String,
    pub status: ReviewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// Session-level outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum ReviewSummary {
    Approved,
    NeedsRevision { items: Vec<RevisionItem> },
}

impl ReviewSummary {
    pub fn is_approved(&self) -> bool {
        matches!(self, ReviewSummary::Approved)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewSession {
    pub session_id: Uuid,
    pub document_type: DocumentType,
    pub items: Vec<ReviewItem>,
    pub judgment_failures: Vec<JudgmentFailure>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ReviewSession {
    /// Create one item per checklist entry, in checklist order.
    ///
    /// Content is looked up by item name first, then by its source key; a blank
    /// value under one key does not hide content under the other.
    pub fn initialize(checklist: &ChecklistSpec, content: &HashMap<String, String>) -> Self {
        let non_blank = |key: &str| {
            content
                .get(key)
                .map(|s| s.as_str())
                .filter(|s| !s.trim().is_empty())
        };
        let items: Vec<ReviewItem> = checklist
            .items()
            .iter()
            .map(|item| {
                let submitted = non_blank(item.name).or_else(|| non_blank(item.source_key));
                ReviewItem::new(item, submitted)
            })
            .collect();

        let missing = items
            .iter()
            .filter(|i| i.status == ReviewStatus::MissingContent)
            .count();
        tracing::debug!(
            "Review session for {}: {} items, {} missing content",
            checklist.document_type,
            items.len(),
            missing
        );

        let mut session = Self {
            session_id: Uuid::new_v4(),
            document_type: checklist.document_type,
            items,
            judgment_failures: Vec::new(),
            started_at: Utc::now(),
            completed_at: None,
        };
        session.mark_complete_if_done();
        session
    }

    /// Judgment requests for every pending item, tagged with the item's index
    pub fn pending_requests(&self) -> Vec<(usize, JudgmentRequest)> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.status == ReviewStatus::Pending)
            .filter_map(|(index, item)| {
                item.content.as_ref().map(|content| {
                    (
                        index,
                        JudgmentRequest {
                            item_name: item.name.clone(),
                            content: content.clone(),
                            document_type: self.document_type,
                        },
                    )
                })
            })
            .collect()
    }

    pub(crate) fn record_verdict(&mut self, index: usize, verdict: Verdict) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        let status = if verdict.adequate {
            ReviewStatus::Pass
        } else {
            ReviewStatus::Fail
        };
        if item.judge(status, verdict.rationale) {
            tracing::debug!("'{}' judged {}", item.name, status);
        }
        self.mark_complete_if_done();
    }

    pub(crate) fn record_failure(&mut self, index: usize, message: String) {
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        if item.judge(ReviewStatus::Fail, JUDGMENT_UNAVAILABLE) {
            tracing::warn!("Judgment unavailable for '{}': {}", item.name, message);
            self.judgment_failures.push(JudgmentFailure {
                item: item.name.clone(),
                document_type: self.document_type,
                message,
            });
        }
        self.mark_complete_if_done();
    }

    fn mark_complete_if_done(&mut self) {
        if self.completed_at.is_none() && self.is_complete() {
            self.completed_at = Some(Utc::now());
        }
    }

    /// Complete once no item is pending
    pub fn is_complete(&self) -> bool {
        self.items.iter().all(|i| i.status.is_terminal())
    }

    /// `Approved` iff every item passed; otherwise the failed and missing items
    /// in checklist order. `None` while any item is still pending.
    pub fn summary(&self) -> Option<ReviewSummary> {
        if !self.is_complete() {
            return None;
        }
        if self.items.iter().all(|i| i.status == ReviewStatus::Pass) {
            return Some(ReviewSummary::Approved);
        }

        Some(ReviewSummary::NeedsRevision {
            items: self
                .items
                .iter()
                .filter(|i| i.status.needs_revision())
                .map(|i| RevisionItem {
                    name: i.name.clone(),
                    status: i.status,
                    rationale: i.rationale.clone(),
                })
                .collect(),
        })
    }

    /// Judgment failures as errors, for callers that want to retry them
    pub fn judgment_errors(&self) -> Vec<WorkflowError> {
        self.judgment_failures.iter().map(WorkflowError::from).collect()
    }

    pub fn item(&self, name: &str) -> Option<&ReviewItem> {
        self.items.iter().find(|i| i.name == name)
    }
}
