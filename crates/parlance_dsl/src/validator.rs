//! Dialect-dependent ordering rules over a step list.
//!
//! Validation is pure and synchronous. It never fails fast: every applicable finding
//! is collected, and each one carries the 1-based step position it refers to.

use parlance_core::{Dialect, Step, StepKind};
use parlance_error::{DefinitionError, DefinitionErrorKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// What a validation finding is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum IssueKind {
    /// The declaration has no steps
    #[display("must have at least one step")]
    EmptySequence,
    /// A rule starts with an action or response
    #[display("{} cannot be the first step; a rule must start with an Intent", _0)]
    FirstStepNotIntent(StepKind),
    /// Two intents in a row
    #[display("Intent cannot be followed directly by another Intent")]
    ConsecutiveIntents,
    /// The last step of a rule is an intent
    #[display("Intent must be followed by an Action or Response")]
    TrailingIntent,
    /// A step without an id
    #[display("invalid step data")]
    InvalidStepData,
    /// The title normalized to nothing
    #[display("declaration name is empty")]
    EmptyName,
    /// Advice: a story usually opens with an intent
    #[display("consider starting with an Intent")]
    SuggestLeadingIntent,
    /// Advice: a story should not end waiting on the bot
    #[display("consider adding a Response or Action after the last Intent")]
    SuggestFollowUp,
}

/// A single finding, optionally tied to a step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct ValidationIssue {
    /// 1-based step position, `None` for declaration-wide findings
    step: Option<usize>,
    /// What the finding is about
    kind: IssueKind,
}

impl ValidationIssue {
    /// A finding about the step at 1-based `position`.
    pub fn at(position: usize, kind: IssueKind) -> Self {
        Self {
            step: Some(position),
            kind,
        }
    }

    /// A declaration-wide finding.
    pub fn general(kind: IssueKind) -> Self {
        Self { step: None, kind }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.step {
            Some(position) => write!(f, "Step {}: {}", position, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Blocking errors and non-blocking warnings for a declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ValidationReport {
    /// Findings that block submission
    errors: Vec<ValidationIssue>,
    /// Advice that never blocks submission
    warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// True when there are no errors. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a blocking error.
    pub fn push_error(&mut self, issue: ValidationIssue) {
        self.errors.push(issue);
    }

    /// Record a warning.
    pub fn push_warning(&mut self, issue: ValidationIssue) {
        self.warnings.push(issue);
    }

    /// Whether any error has this kind.
    pub fn has_error(&self, kind: IssueKind) -> bool {
        self.errors.iter().any(|issue| issue.kind == kind)
    }

    /// Whether any warning has this kind.
    pub fn has_warning(&self, kind: IssueKind) -> bool {
        self.warnings.iter().any(|issue| issue.kind == kind)
    }

    /// Gate for submission.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionErrorKind::ValidationFailed`] if any error is present.
    #[track_caller]
    pub fn into_result(self) -> Result<Self, DefinitionError> {
        if self.is_valid() {
            return Ok(self);
        }
        let summary = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(DefinitionError::new(DefinitionErrorKind::ValidationFailed {
            count: self.errors.len(),
            summary,
        }))
    }
}

/// Check `steps` against the rules of `dialect`.
///
/// # Examples
///
/// ```
/// use parlance_core::{Dialect, Step};
/// use parlance_dsl::{IssueKind, validate};
///
/// let report = validate(Dialect::Rule, &[Step::intent("i1"), Step::intent("i2")]);
/// assert!(report.has_error(IssueKind::ConsecutiveIntents));
/// assert!(!report.is_valid());
///
/// let report = validate(Dialect::Story, &[Step::response("r1")]);
/// assert!(report.is_valid());
/// ```
#[instrument(skip(steps), fields(step_count = steps.len()))]
pub fn validate(dialect: Dialect, steps: &[Step]) -> ValidationReport {
    let mut report = ValidationReport::default();

    if steps.is_empty() {
        report.push_error(ValidationIssue::general(IssueKind::EmptySequence));
        return report;
    }

    for (index, step) in steps.iter().enumerate() {
        if step.id().trim().is_empty() {
            report.push_error(ValidationIssue::at(index + 1, IssueKind::InvalidStepData));
        }
    }

    match dialect {
        Dialect::Rule => check_rule_order(steps, &mut report),
        Dialect::Story => suggest_story_order(steps, &mut report),
    }

    debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validated step sequence"
    );
    report
}

/// Walks the sequence tracking the open intent, the intent still waiting for its
/// first action or response.
fn check_rule_order(steps: &[Step], report: &mut ValidationReport) {
    if let Some(first) = steps.first().filter(|step| !step.kind().is_intent()) {
        report.push_error(ValidationIssue::at(
            1,
            IssueKind::FirstStepNotIntent(*first.kind()),
        ));
    }

    let mut open_intent: Option<usize> = None;
    for (index, step) in steps.iter().enumerate() {
        if step.kind().is_intent() {
            if let Some(previous) = open_intent {
                report.push_error(ValidationIssue::at(
                    previous + 1,
                    IssueKind::ConsecutiveIntents,
                ));
            }
            open_intent = Some(index);
        } else {
            open_intent = None;
        }
    }

    if let Some(last) = open_intent {
        report.push_error(ValidationIssue::at(last + 1, IssueKind::TrailingIntent));
    }
}

fn suggest_story_order(steps: &[Step], report: &mut ValidationReport) {
    if steps.first().is_some_and(|step| !step.kind().is_intent()) {
        report.push_warning(ValidationIssue::at(1, IssueKind::SuggestLeadingIntent));
    }
    if steps.last().is_some_and(|step| step.kind().is_intent()) {
        report.push_warning(ValidationIssue::at(steps.len(), IssueKind::SuggestFollowUp));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(issues: &[ValidationIssue]) -> Vec<(Option<usize>, IssueKind)> {
        issues.iter().map(|i| (i.step, i.kind)).collect()
    }

    #[test]
    fn test_rule_empty_has_exactly_one_error() {
        let report = validate(Dialect::Rule, &[]);
        assert_eq!(
            kinds(report.errors()),
            vec![(None, IssueKind::EmptySequence)]
        );
    }

    #[test]
    fn test_rule_lone_intent_is_trailing() {
        let report = validate(Dialect::Rule, &[Step::intent("a")]);
        assert_eq!(
            kinds(report.errors()),
            vec![(Some(1), IssueKind::TrailingIntent)]
        );
    }

    #[test]
    fn test_rule_two_intents() {
        let report = validate(Dialect::Rule, &[Step::intent("a"), Step::intent("b")]);
        assert_eq!(
            kinds(report.errors()),
            vec![
                (Some(1), IssueKind::ConsecutiveIntents),
                (Some(2), IssueKind::TrailingIntent),
            ]
        );
    }

    #[test]
    fn test_rule_action_first() {
        let report = validate(Dialect::Rule, &[Step::action("x")]);
        assert_eq!(
            kinds(report.errors()),
            vec![(Some(1), IssueKind::FirstStepNotIntent(StepKind::Action))]
        );
    }

    #[test]
    fn test_rule_minimal_valid() {
        assert!(validate(Dialect::Rule, &[Step::intent("a"), Step::action("x")]).is_valid());
    }

    #[test]
    fn test_rule_alternating_valid() {
        let steps = [
            Step::intent("a"),
            Step::action("x"),
            Step::intent("b"),
            Step::response("y"),
        ];
        let report = validate(Dialect::Rule, &steps);
        assert!(report.is_valid());
        assert!(report.warnings().is_empty());
    }

    #[test]
    fn test_rule_several_reactions_per_intent_valid() {
        let steps = [
            Step::intent("a"),
            Step::action("x"),
            Step::response("y"),
            Step::intent("b"),
            Step::action("z"),
        ];
        assert!(validate(Dialect::Rule, &steps).is_valid());
    }

    #[test]
    fn test_rule_collects_all_errors() {
        let steps = [
            Step::response("y"),
            Step::intent("a"),
            Step::intent("b"),
            Step::action(""),
            Step::intent("c"),
        ];
        let report = validate(Dialect::Rule, &steps);
        assert_eq!(
            kinds(report.errors()),
            vec![
                (Some(4), IssueKind::InvalidStepData),
                (Some(1), IssueKind::FirstStepNotIntent(StepKind::Response)),
                (Some(2), IssueKind::ConsecutiveIntents),
                (Some(5), IssueKind::TrailingIntent),
            ]
        );
    }

    #[test]
    fn test_story_empty_is_error() {
        assert_eq!(validate(Dialect::Story, &[]).errors().len(), 1);
    }

    #[test]
    fn test_story_response_only_is_valid_with_warning() {
        let report = validate(Dialect::Story, &[Step::response("y")]);
        assert!(report.is_valid());
        assert!(report.has_warning(IssueKind::SuggestLeadingIntent));
    }

    #[test]
    fn test_story_trailing_intent_is_warning() {
        let report = validate(Dialect::Story, &[Step::intent("a")]);
        assert!(report.is_valid());
        assert!(report.has_warning(IssueKind::SuggestFollowUp));
        assert!(
            report.warnings()[0]
                .to_string()
                .contains("consider adding a Response or Action")
        );
    }

    #[test]
    fn test_story_blank_id_is_invalid_step_data() {
        let report = validate(Dialect::Story, &[Step::intent("a"), Step::action("  ")]);
        assert_eq!(
            kinds(report.errors()),
            vec![(Some(2), IssueKind::InvalidStepData)]
        );
    }

    #[test]
    fn test_issue_display_uses_one_based_position() {
        let issue = ValidationIssue::at(3, IssueKind::TrailingIntent);
        assert_eq!(
            issue.to_string(),
            "Step 3: Intent must be followed by an Action or Response"
        );
    }

    #[test]
    fn test_into_result_blocks_on_errors_only() {
        let warned = validate(Dialect::Story, &[Step::intent("a")]);
        assert!(warned.into_result().is_ok());

        let err = validate(Dialect::Rule, &[]).into_result().unwrap_err();
        assert!(matches!(
            err.kind,
            DefinitionErrorKind::ValidationFailed { count: 1, .. }
        ));
    }
}
