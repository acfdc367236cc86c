//! Steps of a rule or story declaration.

use crate::CatalogKind;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// The kind of catalog entry a step references.
///
/// # Examples
///
/// ```
/// use parlance_core::StepKind;
///
/// let kind: StepKind = "response".parse().unwrap();
/// assert_eq!(kind, StepKind::Response);
/// assert_eq!(kind.marker(), "action");
/// assert_eq!(format!("{}", StepKind::Intent), "Intent");
/// ```
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
pub enum StepKind {
    /// A user intent the conversation reacts to
    Intent,
    /// A custom action the bot runs
    Action,
    /// A templated bot response
    Response,
}

impl StepKind {
    /// Returns true for [`StepKind::Intent`].
    pub fn is_intent(self) -> bool {
        matches!(self, StepKind::Intent)
    }

    /// The DSL marker written before the reference.
    ///
    /// Actions and responses share the `action` marker; the distinction only lives
    /// in memory and in the separate id lists sent to the backend.
    pub fn marker(self) -> &'static str {
        match self {
            StepKind::Intent => "intent",
            StepKind::Action | StepKind::Response => "action",
        }
    }

    /// The catalog namespace holding entries of this kind.
    pub fn catalog_kind(self) -> CatalogKind {
        match self {
            StepKind::Intent => CatalogKind::Intent,
            StepKind::Action => CatalogKind::Action,
            StepKind::Response => CatalogKind::Response,
        }
    }
}

/// A single unit of a declaration.
///
/// Identity is the `(id, kind)` pair. The display name is resolved lazily from the
/// catalog and does not take part in equality or hashing.
///
/// # Examples
///
/// ```
/// use parlance_core::{Step, StepKind};
///
/// let resolved = Step::intent("a1b2c3").with_display_name("greet");
/// assert_eq!(resolved, Step::new("a1b2c3", StepKind::Intent));
/// assert_eq!(resolved.label(), "greet");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, derive_getters::Getters)]
pub struct Step {
    /// Opaque catalog identifier
    id: String,
    /// Which catalog the id belongs to
    kind: StepKind,
    /// Human-readable label, when resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
}

impl Step {
    /// Create an unresolved step.
    pub fn new(id: impl Into<String>, kind: StepKind) -> Self {
        Self {
            id: id.into(),
            kind,
            display_name: None,
        }
    }

    /// Create an intent step.
    pub fn intent(id: impl Into<String>) -> Self {
        Self::new(id, StepKind::Intent)
    }

    /// Create an action step.
    pub fn action(id: impl Into<String>) -> Self {
        Self::new(id, StepKind::Action)
    }

    /// Create a response step.
    pub fn response(id: impl Into<String>) -> Self {
        Self::new(id, StepKind::Response)
    }

    /// Attach a resolved display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Reclassify the step, keeping id and display name.
    pub fn with_kind(mut self, kind: StepKind) -> Self {
        self.kind = kind;
        self
    }

    /// The display name if resolved, otherwise the raw id.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}

impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.kind == other.kind
    }
}

impl Eq for Step {}

impl Hash for Step {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.kind.hash(state);
    }
}
