//! Review item and status types

use serde::{Deserialize, Serialize};

use crate::checklist::ChecklistItem;

/// Review status of one checklist section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Content present, awaiting adequacy judgment
    Pending,
    Pass,
    Fail,
    /// Absent or blank content; terminal without judgment
    MissingContent,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::MissingContent => "missing_content",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Only a pending item can be judged
    pub fn can_transition_to(&self, target: ReviewStatus) -> bool {
        matches!((self, target), (Self::Pending, Self::Pass | Self::Fail))
    }

    /// Needs the author's attention before approval
    pub fn needs_revision(&self) -> bool {
        matches!(self, Self::Fail | Self::MissingContent)
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One checklist section with its submitted content and review outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewItem {
    pub name: String,
    pub source_key: String,
    pub content: Option<String>,
    pub status: ReviewStatus,
    pub rationale: Option<String>,
}

impl ReviewItem {
    /// Seed an item from its checklist entry; blank content is treated as absent
    pub fn new(item: &ChecklistItem, content: Option<&str>) -> Self {
        let content = content
            .filter(|c| !c.trim().is_empty())
            .map(|c| c.to_string());
        let status = if content.is_some() {
            ReviewStatus::Pending
        } else {
            ReviewStatus::MissingContent
        };

        Self {
            name: item.name.to_string(),
            source_key: item.source_key.to_string(),
            content,
            status,
            rationale: None,
        }
    }

    /// Record a judgment. Returns false, leaving the item unchanged, if the
    /// item was not pending.
    pub(crate) fn judge(&mut self, status: ReviewStatus, rationale: impl Into<String>) -> bool {
        if !self.status.can_transition_to(status) {
            return false;
        }
        self.status = status;
        self.rationale = Some(rationale.into());
        true
    }
}
