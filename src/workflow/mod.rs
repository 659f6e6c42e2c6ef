//! Document workflow state machine
//!
//! `Uninitialized → Classified → ChecklistResolved → ReviewInProgress → ReviewComplete`,
//! or `Uninitialized → Unsupported` for requests outside the supported set.

mod engine;
mod state;

pub use engine::{DocumentWorkflow, DocumentWorkflowBuilder};
pub use state::{PhaseTransition, WorkflowPhase, WorkflowState};
