//! Document Templates
//!
//! Descriptive template text for each supported business document, loaded from
//! a YAML file and looked up by the document's label. Templates feed downstream
//! document drafting only; review checklists are fixed in the workflow crate.
//!
//! # Example
//!
//! ```yaml
//! templates:
//!   영업방문 결과보고서:
//!     document_information: |
//!       ## 고객사 개요
//!       ...
//! ```

mod definition;
mod error;
mod registry;

pub use definition::{TemplateDefinition, TemplateFile};
pub use error::TemplateError;
pub use registry::TemplateRegistry;
