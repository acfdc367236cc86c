//! Core data types for the Parlance step-sequence DSL engine.
//!
//! This crate provides the types shared by every Parlance crate: the steps that make
//! up a rule or story, the catalog entries they reference, the two dialects and the
//! normalized declaration name.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod dialect;
mod logging;
mod name;
mod step;

pub use catalog::{CatalogEntry, CatalogEntryBuilder, CatalogKind};
pub use dialect::Dialect;
pub use logging::{LoggingConfig, init_logging};
pub use name::{DeclarationName, PLACEHOLDER_NAME, normalize_name};
pub use step::{Step, StepKind};
