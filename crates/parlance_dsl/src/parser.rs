//! DSL text parsing back into an ordered step list.
//!
//! Parsing is line oriented and identical for both dialects. Trailing `#` comments are
//! dropped first. Any remaining line content that mentions `intent:` or `action:` is a
//! step marker, the earlier of the two deciding the kind, and the first bracket
//! reference is its id. Marker lines without an id are skipped.

use crate::{ParserConfig, first_reference, strip_comment};
use parlance_core::{CatalogEntry, CatalogKind, Dialect, Step, StepKind};
use parlance_interface::CatalogLookup;
use std::collections::HashSet;
use tracing::{debug, instrument, warn};

/// Which step marker a line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Marker {
    Intent,
    Action,
}

fn classify_line(code: &str) -> Option<Marker> {
    [("intent:", Marker::Intent), ("action:", Marker::Action)]
        .into_iter()
        .filter_map(|(key, marker)| code.find(key).map(|position| (position, marker)))
        .min_by_key(|(position, _)| *position)
        .map(|(_, marker)| marker)
}

fn marked_references(raw_text: &str) -> impl Iterator<Item = (Marker, &str)> {
    raw_text.lines().enumerate().filter_map(|(number, line)| {
        let code = strip_comment(line);
        let marker = classify_line(code)?;
        match first_reference(code) {
            Some(id) => Some((marker, id)),
            None => {
                debug!(line = number + 1, "Step marker without reference, skipping");
                None
            }
        }
    })
}

/// Extract steps without consulting the catalog.
///
/// `action:` lines are classified as [`StepKind::Action`]; telling actions from
/// responses needs a catalog round trip, see [`DefinitionParser`].
///
/// # Examples
///
/// ```
/// use parlance_core::Step;
/// use parlance_dsl::scan_steps;
///
/// let text = "- rule: greet\n  steps:\n    - intent: [i1]\n    - intent:\n    - action: [a1]";
/// assert_eq!(scan_steps(text), vec![Step::intent("i1"), Step::action("a1")]);
/// ```
pub fn scan_steps(raw_text: &str) -> Vec<Step> {
    marked_references(raw_text)
        .map(|(marker, id)| match marker {
            Marker::Intent => Step::intent(id),
            Marker::Action => Step::action(id),
        })
        .collect()
}

/// Recover dialect and name from the first header line.
///
/// # Examples
///
/// ```
/// use parlance_core::Dialect;
/// use parlance_dsl::parse_header;
///
/// assert_eq!(
///     parse_header("# note\n- story: order_pizza\n  steps:"),
///     Some((Dialect::Story, "order_pizza".to_string()))
/// );
/// assert_eq!(parse_header("  steps:"), None);
/// ```
pub fn parse_header(raw_text: &str) -> Option<(Dialect, String)> {
    raw_text.lines().find_map(|line| {
        let trimmed = line.trim();
        [Dialect::Rule, Dialect::Story].into_iter().find_map(|dialect| {
            trimmed
                .strip_prefix(&dialect.header_token())
                .map(|rest| (dialect, strip_comment(rest).trim().to_string()))
        })
    })
}

/// Why a step carries a placeholder name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Unresolved {
    /// Every consulted catalog answered that the id does not exist
    #[display("not found")]
    NotFound,
    /// At least one consulted catalog could not be reached
    #[display("lookup failed")]
    LookupFailed,
}

/// Where a parsed step's display name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum NameSource {
    /// Resolved from the catalog
    #[display("catalog")]
    Catalog,
    /// Synthesized from the id suffix
    #[display("placeholder ({})", _0)]
    Placeholder(Unresolved),
}

/// A step recovered from DSL text together with its name provenance.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ParsedStep {
    /// The resolved step
    step: Step,
    /// Where the display name came from
    source: NameSource,
}

impl ParsedStep {
    /// Consume into the step.
    pub fn into_step(self) -> Step {
        self.step
    }

    /// Whether the display name is a placeholder.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.source, NameSource::Placeholder(_))
    }
}

enum Lookup {
    Found(CatalogEntry),
    Missing,
    Failed,
}

/// Synthesize a display name from the last `len` characters of an id.
pub fn fallback_name(id: &str, len: usize) -> String {
    let count = id.chars().count();
    id.chars().skip(count.saturating_sub(len)).collect()
}

/// Parses DSL text into steps, resolving display names through the catalog.
///
/// Lookups that fail or find nothing never abort the parse; the step is kept with a
/// placeholder name and the reason is recorded in [`NameSource`].
pub struct DefinitionParser<'a> {
    catalog: &'a dyn CatalogLookup,
    config: ParserConfig,
    response_hints: HashSet<String>,
}

impl<'a> DefinitionParser<'a> {
    /// Create a parser over a catalog with default configuration.
    pub fn new(catalog: &'a dyn CatalogLookup) -> Self {
        Self {
            catalog,
            config: ParserConfig::default(),
            response_hints: HashSet::new(),
        }
    }

    /// Use the given parser configuration.
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// Ids known to be responses even if the catalog cannot confirm them.
    ///
    /// Used when hydrating a stored declaration whose `responses` array is available.
    pub fn with_response_hints<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.response_hints = ids.into_iter().map(Into::into).collect();
        self
    }

    /// The catalog this parser resolves against.
    pub fn catalog(&self) -> &'a dyn CatalogLookup {
        self.catalog
    }

    /// Parse `raw_text`, preserving line order exactly.
    #[instrument(skip_all, fields(len = raw_text.len()))]
    pub async fn parse(&self, raw_text: &str) -> Vec<ParsedStep> {
        let mut parsed = Vec::new();
        for (marker, id) in marked_references(raw_text) {
            let step = match marker {
                Marker::Intent => self.resolve_intent(id).await,
                Marker::Action => self.resolve_action(id).await,
            };
            debug!(id, kind = %step.step.kind(), source = %step.source, "Parsed step");
            parsed.push(step);
        }
        parsed
    }

    /// Parse `raw_text` and drop name provenance.
    pub async fn parse_steps(&self, raw_text: &str) -> Vec<Step> {
        self.parse(raw_text)
            .await
            .into_iter()
            .map(ParsedStep::into_step)
            .collect()
    }

    async fn lookup(&self, kind: CatalogKind, id: &str) -> Lookup {
        match self.catalog.get_by_id(kind, id).await {
            Ok(Some(entry)) => Lookup::Found(entry),
            Ok(None) => Lookup::Missing,
            Err(e) => {
                warn!(%kind, id, error = %e, "Catalog lookup failed");
                Lookup::Failed
            }
        }
    }

    fn resolved(&self, id: &str, kind: StepKind, entry: CatalogEntry) -> ParsedStep {
        ParsedStep {
            step: Step::new(id, kind).with_display_name(entry.name().clone()),
            source: NameSource::Catalog,
        }
    }

    fn placeholder(&self, id: &str, kind: StepKind, reason: Unresolved) -> ParsedStep {
        ParsedStep {
            step: Step::new(id, kind)
                .with_display_name(fallback_name(id, *self.config.fallback_name_len())),
            source: NameSource::Placeholder(reason),
        }
    }

    async fn resolve_intent(&self, id: &str) -> ParsedStep {
        match self.lookup(CatalogKind::Intent, id).await {
            Lookup::Found(entry) => self.resolved(id, StepKind::Intent, entry),
            Lookup::Missing => self.placeholder(id, StepKind::Intent, Unresolved::NotFound),
            Lookup::Failed => self.placeholder(id, StepKind::Intent, Unresolved::LookupFailed),
        }
    }

    async fn resolve_action(&self, id: &str) -> ParsedStep {
        let action = self.lookup(CatalogKind::Action, id).await;
        if let Lookup::Found(entry) = action {
            return self.resolved(id, StepKind::Action, entry);
        }

        let response = self.lookup(CatalogKind::Response, id).await;
        if let Lookup::Found(entry) = response {
            return self.resolved(id, StepKind::Response, entry);
        }

        let reason = if matches!(action, Lookup::Failed) || matches!(response, Lookup::Failed) {
            Unresolved::LookupFailed
        } else {
            Unresolved::NotFound
        };
        let mut parsed = self.placeholder(id, StepKind::Action, reason);
        if self.response_hints.contains(id) {
            parsed.step = parsed.step.with_kind(StepKind::Response);
        }
        parsed
    }
}
