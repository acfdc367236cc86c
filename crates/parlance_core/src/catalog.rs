//! Catalog entries referenced by steps.

use crate::StepKind;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Namespaces of the external catalog.
///
/// Action and response ids live in disjoint namespaces server-side even though the
/// DSL writes both with the same marker.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CatalogKind {
    /// Intents recognised from user messages
    #[display("intent")]
    Intent,
    /// Custom actions
    #[display("action")]
    Action,
    /// Templated responses
    #[display("response")]
    Response,
    /// Entities tagged inside intent examples
    #[display("entity")]
    Entity,
}

impl From<StepKind> for CatalogKind {
    fn from(kind: StepKind) -> Self {
        kind.catalog_kind()
    }
}

/// A read-only entry resolved from the catalog.
///
/// # Examples
///
/// ```
/// use parlance_core::{CatalogEntry, CatalogKind};
///
/// let entry = CatalogEntry::builder()
///     .id("6f1c2a")
///     .name("greet")
///     .kind(CatalogKind::Intent)
///     .build()
///     .unwrap();
/// assert_eq!(entry.name(), "greet");
/// assert!(entry.description().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into))]
pub struct CatalogEntry {
    /// Opaque identifier assigned by the catalog
    id: String,
    /// Human-readable name
    name: String,
    /// Namespace of the entry
    kind: CatalogKind,
    /// Optional free-text description
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl CatalogEntry {
    /// Create a new builder for constructing a catalog entry.
    pub fn builder() -> CatalogEntryBuilder {
        CatalogEntryBuilder::default()
    }

    /// Create an entry without description.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: CatalogKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            description: None,
        }
    }
}
