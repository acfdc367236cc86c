//! The declaration being edited.
//!
//! A declaration is either edited visually, as an ordered step list, or in expert
//! mode, as hand-written DSL text. Exactly one representation is the source of truth
//! at a time; switching modes converts one way at the boundary.

use crate::{
    DefinitionParser, IssueKind, ValidationIssue, ValidationReport, generate, is_encodable,
    parse_header, rename_header, scan_steps, validate,
};
use parlance_core::{DeclarationName, Dialect, Step, StepKind};
use parlance_error::{DefinitionError, DefinitionErrorKind, ParlanceResult};
use parlance_interface::{DeclarationPayload, StoredDeclaration};
use std::borrow::Cow;
use tracing::{debug, instrument, warn};

/// Which editing mode a declaration is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EditMode {
    /// Step list editing
    #[display("visual")]
    Visual,
    /// Raw DSL text editing
    #[display("expert")]
    Expert,
}

/// The single source of truth for a declaration's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditSource {
    /// Ordered steps; the text is generated from them
    Visual(Vec<Step>),
    /// Hand-written text; steps are parsed from it
    Expert(String),
}

impl EditSource {
    /// The mode this source belongs to.
    pub fn mode(&self) -> EditMode {
        match self {
            EditSource::Visual(_) => EditMode::Visual,
            EditSource::Expert(_) => EditMode::Expert,
        }
    }
}

/// A rule or story under edit.
///
/// # Examples
///
/// ```
/// use parlance_core::{Dialect, Step};
/// use parlance_dsl::Declaration;
///
/// let mut rule = Declaration::new("Greet User", Dialect::Rule);
/// rule.push_step(Step::intent("i1")).unwrap();
/// let report = rule.push_step(Step::response("r1")).unwrap();
/// assert!(report.is_valid());
/// assert_eq!(
///     rule.raw_text(),
///     "- rule: greet_user\n  steps:\n    - intent: [i1]\n    - action: [r1]"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct Declaration {
    /// Backend id once stored
    id: Option<String>,
    /// Normalized name
    name: DeclarationName,
    /// Dialect, fixed for the declaration's lifetime
    dialect: Dialect,
    /// Current source of truth
    source: EditSource,
}

impl Declaration {
    /// Start a fresh declaration with no steps, in visual mode.
    pub fn new(title: &str, dialect: Dialect) -> Self {
        Self {
            id: None,
            name: DeclarationName::from_title(title),
            dialect,
            source: EditSource::Visual(Vec::new()),
        }
    }

    /// Start a declaration from hand-written text, in expert mode.
    pub fn from_text(title: &str, dialect: Dialect, raw_text: impl Into<String>) -> Self {
        Self {
            id: None,
            name: DeclarationName::from_title(title),
            dialect,
            source: EditSource::Expert(raw_text.into()),
        }
    }

    /// Rebuild a stored declaration in visual mode.
    ///
    /// Step names are resolved through the parser's catalog; ids listed in the stored
    /// `responses` array are classified as responses even when the catalog cannot
    /// resolve them.
    #[instrument(skip_all, fields(id = %stored.id()))]
    pub async fn hydrate(stored: &StoredDeclaration, parser: DefinitionParser<'_>) -> Self {
        let payload = stored.payload();
        let parser = parser.with_response_hints(payload.responses.iter().cloned());
        let steps = parser.parse_steps(&payload.define).await;
        debug!(step_count = steps.len(), "Hydrated declaration");

        Self {
            id: Some(stored.id().clone()),
            name: DeclarationName::from_title(&payload.name),
            dialect: *stored.dialect(),
            source: EditSource::Visual(steps),
        }
    }

    /// The current editing mode.
    pub fn mode(&self) -> EditMode {
        self.source.mode()
    }

    /// Record the backend id after the first save.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// The steps, when in visual mode.
    pub fn steps(&self) -> Option<&[Step]> {
        match &self.source {
            EditSource::Visual(steps) => Some(steps),
            EditSource::Expert(_) => None,
        }
    }

    /// The DSL text: generated in visual mode, as written in expert mode.
    pub fn raw_text(&self) -> Cow<'_, str> {
        match &self.source {
            EditSource::Visual(steps) => Cow::Owned(generate(&self.name, self.dialect, steps)),
            EditSource::Expert(text) => Cow::Borrowed(text),
        }
    }

    /// Replace the expert-mode text.
    ///
    /// # Errors
    ///
    /// Returns an error in visual mode.
    pub fn set_raw_text(&mut self, raw_text: impl Into<String>) -> Result<(), DefinitionError> {
        match &mut self.source {
            EditSource::Expert(text) => {
                *text = raw_text.into();
                Ok(())
            }
            EditSource::Visual(_) => Err(mode_mismatch(EditMode::Expert)),
        }
    }

    /// Change the title.
    ///
    /// Visual mode regenerates from the new name. Expert mode rewrites only the header
    /// line's name and leaves every other line untouched; text without a header line
    /// is left as is.
    #[instrument(skip(self), fields(mode = %self.mode()))]
    pub fn rename(&mut self, title: &str) {
        let name = DeclarationName::from_title(title);
        if let EditSource::Expert(text) = &mut self.source {
            match rename_header(text, self.dialect, &name) {
                Some(renamed) => *text = renamed,
                None => warn!("Expert text has no header line, name not written"),
            }
        }
        self.name = name;
    }

    /// Switch to expert mode, generating the text from the steps.
    pub fn switch_to_expert(&mut self) {
        if let EditSource::Visual(steps) = &self.source {
            let text = generate(&self.name, self.dialect, steps);
            debug!(len = text.len(), "Switched to expert mode");
            self.source = EditSource::Expert(text);
        }
    }

    /// Switch to visual mode, parsing the text into steps.
    ///
    /// A non-empty name on the header line replaces the current name.
    #[instrument(skip_all)]
    pub async fn switch_to_visual(&mut self, parser: &DefinitionParser<'_>) {
        if let EditSource::Expert(text) = &self.source {
            if let Some((_, title)) = parse_header(text) {
                let name = DeclarationName::from_title(&title);
                if !name.is_placeholder() {
                    self.name = name;
                }
            }
            let steps = parser.parse_steps(text).await;
            debug!(step_count = steps.len(), "Switched to visual mode");
            self.source = EditSource::Visual(steps);
        }
    }

    fn visual_steps_mut(&mut self) -> Result<&mut Vec<Step>, DefinitionError> {
        match &mut self.source {
            EditSource::Visual(steps) => Ok(steps),
            EditSource::Expert(_) => Err(mode_mismatch(EditMode::Visual)),
        }
    }

    /// Append a step and revalidate.
    ///
    /// # Errors
    ///
    /// Returns an error in expert mode or if the id cannot be embedded in a reference.
    pub fn push_step(&mut self, step: Step) -> Result<ValidationReport, DefinitionError> {
        check_encodable(&step)?;
        self.visual_steps_mut()?.push(step);
        Ok(self.validate())
    }

    /// Insert a step at `index` and revalidate.
    ///
    /// # Errors
    ///
    /// Returns an error in expert mode, if `index` is past the end, or if the id cannot
    /// be embedded in a reference.
    pub fn insert_step(
        &mut self,
        index: usize,
        step: Step,
    ) -> Result<ValidationReport, DefinitionError> {
        check_encodable(&step)?;
        let steps = self.visual_steps_mut()?;
        if index > steps.len() {
            return Err(out_of_range(index, steps.len()));
        }
        steps.insert(index, step);
        Ok(self.validate())
    }

    /// Remove the step at `index` and revalidate.
    ///
    /// # Errors
    ///
    /// Returns an error in expert mode or if `index` does not address a step.
    pub fn remove_step(&mut self, index: usize) -> Result<ValidationReport, DefinitionError> {
        let steps = self.visual_steps_mut()?;
        if index >= steps.len() {
            return Err(out_of_range(index, steps.len()));
        }
        steps.remove(index);
        Ok(self.validate())
    }

    /// Move the step at `from` so it ends up at `to`, and revalidate.
    ///
    /// # Errors
    ///
    /// Returns an error in expert mode or if either index does not address a step.
    pub fn move_step(&mut self, from: usize, to: usize) -> Result<ValidationReport, DefinitionError> {
        let steps = self.visual_steps_mut()?;
        let len = steps.len();
        if from >= len {
            return Err(out_of_range(from, len));
        }
        if to >= len {
            return Err(out_of_range(to, len));
        }
        let step = steps.remove(from);
        steps.insert(to, step);
        Ok(self.validate())
    }

    /// Validate the current content and name.
    ///
    /// Expert-mode text is scanned without the catalog, which is enough for ordering
    /// rules since actions and responses are interchangeable there.
    pub fn validate(&self) -> ValidationReport {
        let mut report = match &self.source {
            EditSource::Visual(steps) => validate(self.dialect, steps),
            EditSource::Expert(text) => validate(self.dialect, &scan_steps(text)),
        };
        if self.name.is_placeholder() {
            report.push_error(ValidationIssue::general(IssueKind::EmptyName));
        }
        report
    }

    /// Build the request body for the persistence collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionErrorKind::ValidationFailed`] while any validation error is
    /// present.
    #[instrument(skip_all, fields(name = %self.name, mode = %self.mode()))]
    pub async fn to_payload(
        &self,
        description: &str,
        parser: &DefinitionParser<'_>,
    ) -> ParlanceResult<DeclarationPayload> {
        self.validate().into_result()?;

        let steps: Cow<'_, [Step]> = match &self.source {
            EditSource::Visual(steps) => Cow::Borrowed(steps),
            EditSource::Expert(text) => Cow::Owned(parser.parse_steps(text).await),
        };

        Ok(DeclarationPayload {
            name: self.name.as_str().to_string(),
            description: description.to_string(),
            define: self.raw_text().into_owned(),
            intents: ids_of(&steps, StepKind::Intent),
            action: ids_of(&steps, StepKind::Action),
            responses: ids_of(&steps, StepKind::Response),
        })
    }
}

/// Ids of one kind, de-duplicated in first-seen order.
fn ids_of(steps: &[Step], kind: StepKind) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for step in steps.iter().filter(|step| *step.kind() == kind) {
        if !ids.contains(step.id()) {
            ids.push(step.id().clone());
        }
    }
    ids
}

#[track_caller]
fn mode_mismatch(required: EditMode) -> DefinitionError {
    DefinitionError::new(DefinitionErrorKind::ModeMismatch(required.to_string()))
}

#[track_caller]
fn out_of_range(index: usize, len: usize) -> DefinitionError {
    DefinitionError::new(DefinitionErrorKind::StepIndexOutOfRange { index, len })
}

fn check_encodable(step: &Step) -> Result<(), DefinitionError> {
    if is_encodable(step.id()) {
        Ok(())
    } else {
        Err(DefinitionError::new(DefinitionErrorKind::UnencodableId(
            step.id().clone(),
        )))
    }
}
