//! TOML input files for the command line.
//!
//! A declaration file lists steps in order:
//!
//! ```toml
//! name = "Greet User"
//! dialect = "rule"
//!
//! [[steps]]
//! id = "65a1f0c2b9e4"
//! kind = "intent"
//!
//! [[steps]]
//! id = "65a1f0c2b9f7"
//! kind = "response"
//! ```
//!
//! A catalog file lists entries to resolve names against:
//!
//! ```toml
//! [[entries]]
//! id = "65a1f0c2b9e4"
//! name = "greet"
//! kind = "intent"
//! ```

use derive_getters::Getters;
use parlance_core::{CatalogEntry, Dialect, Step, StepKind};
use parlance_dsl::{Declaration, InMemoryCatalog};
use parlance_error::{FileError, ParlanceResult, TomlError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Read a whole text file.
///
/// # Errors
///
/// Returns a [`FileError`] naming the path if the file cannot be read.
pub fn read_text(path: &Path) -> ParlanceResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        FileError::new(format!("Failed to read {}: {}", path.display(), e)).into()
    })
}

fn parse_toml<T: serde::de::DeserializeOwned>(source: &str, what: &str) -> ParlanceResult<T> {
    toml::from_str(source)
        .map_err(|e| TomlError::new(format!("Invalid {} file: {}", what, e)).into())
}

/// One step of a declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Catalog id
    pub id: String,
    /// Step kind
    pub kind: StepKind,
}

/// A declaration described in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct DeclarationFile {
    /// Title; normalized when converted into a declaration
    name: String,
    /// Dialect, `rule` unless given
    #[serde(default)]
    dialect: Dialect,
    /// Free-text description
    #[serde(default)]
    description: String,
    /// Ordered steps
    #[serde(default)]
    steps: Vec<StepRecord>,
}

impl DeclarationFile {
    /// Parse a declaration file from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a [`TomlError`] if the text is not a valid declaration file.
    pub fn from_toml_str(source: &str) -> ParlanceResult<Self> {
        parse_toml(source, "declaration")
    }

    /// Read and parse a declaration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> ParlanceResult<Self> {
        Self::from_toml_str(&read_text(path)?)
    }

    /// Build a visual-mode declaration from the listed steps.
    ///
    /// # Errors
    ///
    /// Returns an error if a step id cannot be embedded in a reference.
    pub fn into_declaration(self) -> ParlanceResult<Declaration> {
        let mut declaration = Declaration::new(&self.name, self.dialect);
        for record in self.steps {
            declaration.push_step(Step::new(record.id, record.kind))?;
        }
        debug!(name = %declaration.name(), "Declaration built from file");
        Ok(declaration)
    }
}

/// Catalog entries described in TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CatalogFile {
    /// Entries of any kind
    #[serde(default)]
    entries: Vec<CatalogEntry>,
}

impl CatalogFile {
    /// Parse a catalog file from TOML text.
    ///
    /// # Errors
    ///
    /// Returns a [`TomlError`] if the text is not a valid catalog file.
    pub fn from_toml_str(source: &str) -> ParlanceResult<Self> {
        parse_toml(source, "catalog")
    }

    /// Read and parse a catalog file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> ParlanceResult<Self> {
        Self::from_toml_str(&read_text(path)?)
    }

    /// Load the entries into an in-memory catalog.
    ///
    /// # Errors
    ///
    /// Returns an error on an unencodable id or a duplicate entry.
    pub fn into_catalog(self) -> ParlanceResult<InMemoryCatalog> {
        InMemoryCatalog::from_entries(self.entries)
    }
}
