//! Document classification and checklist review
//!
//! A free-text request is classified into one of a closed set of business
//! documents (or rejected), the document's required sections are resolved, and
//! submitted section content is reviewed item by item.
//!
//! ## Architecture
//!
//! ```text
//! Request → Classifier → DocumentType ─┬─ Unsupported (halt)
//!                                      └─ Checklist → ReviewSession → Summary
//! ```
//!
//! Natural-language judgments are delegated to oracles (`oracle` module); the
//! hosted-model plumbing lives in `docflow-agentic` and template storage in
//! `docflow-templates`.

pub mod checklist;
pub mod classifier;
pub mod config;
pub mod document_type;
pub mod error;
pub mod oracle;
pub mod review;
pub mod templates;
pub mod workflow;

pub use checklist::{resolve_checklist, ChecklistItem, ChecklistSpec};
pub use classifier::{ClassificationResult, Classifier};
pub use config::DocflowConfig;
pub use document_type::DocumentType;
pub use error::WorkflowError;
pub use oracle::{AdequacyOracle, ClassificationOracle, JudgmentRequest, Verdict};
pub use review::{ReviewItem, ReviewPipeline, ReviewSession, ReviewStatus, ReviewSummary};
pub use templates::TemplateLookup;
pub use workflow::{DocumentWorkflow, WorkflowPhase, WorkflowState};
