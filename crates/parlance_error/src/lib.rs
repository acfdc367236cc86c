//! Error types for the Parlance library.
//!
//! This crate provides the foundation error types used throughout the Parlance workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Sequence validation findings are not errors. They are reported as data by the
//! validator and only become a [`DefinitionError`] at the submission gate.
//!
//! # Examples
//!
//! ```
//! use parlance_error::{CatalogError, CatalogErrorKind, ParlanceResult};
//!
//! fn lookup() -> ParlanceResult<String> {
//!     Err(CatalogError::new(CatalogErrorKind::Unavailable("connection refused".into())))?
//! }
//!
//! match lookup() {
//!     Ok(name) => println!("Got: {}", name),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod config;
mod definition;
mod error;
mod file;
mod json;
mod persistence;
mod toml;

pub use catalog::{CatalogError, CatalogErrorKind};
pub use config::ConfigError;
pub use definition::{DefinitionError, DefinitionErrorKind};
pub use error::{ParlanceError, ParlanceErrorKind, ParlanceResult};
pub use file::FileError;
pub use json::JsonError;
pub use persistence::{PersistenceError, PersistenceErrorKind};
pub use toml::TomlError;
