//! Checklist-driven review of submitted document sections

mod item;
mod pipeline;
mod session;

pub use item::{ReviewItem, ReviewStatus};
pub use pipeline::{ReviewPipeline, DEFAULT_MAX_CONCURRENT_JUDGMENTS};
pub use session::{
    JudgmentFailure, ReviewSession, ReviewSummary, RevisionItem, JUDGMENT_UNAVAILABLE,
};
