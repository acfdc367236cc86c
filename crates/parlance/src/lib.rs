//! Parlance - author conversational rules and stories as step-sequence DSL text.
//!
//! A declaration is an ordered list of intent, action and response steps referencing
//! catalog entries by opaque id. Parlance renders declarations to DSL text, parses
//! hand-written text back, validates step ordering and prepares the payload stored by
//! the backend.
//!
//! # Quick Start
//!
//! ```
//! use parlance::{Declaration, Dialect, Step};
//!
//! let mut rule = Declaration::new("Greet User", Dialect::Rule);
//! rule.push_step(Step::intent("65a1f0c2b9e4")).unwrap();
//! let report = rule.push_step(Step::response("65a1f0c2b9f7")).unwrap();
//! assert!(report.is_valid());
//! println!("{}", rule.raw_text());
//! ```
//!
//! # Architecture
//!
//! - `parlance_error` - Error types
//! - `parlance_core` - Steps, catalog entries, dialects, names and logging setup
//! - `parlance_interface` - Catalog and persistence collaborator traits
//! - `parlance_dsl` - Generator, parser, validator and the editing model
//!
//! This crate re-exports everything for convenience and adds the file formats read by
//! the `parlance` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod files;

pub use files::{CatalogFile, DeclarationFile, StepRecord, read_text};

pub use parlance_core::*;
pub use parlance_dsl::*;
pub use parlance_error::*;
pub use parlance_interface::*;
