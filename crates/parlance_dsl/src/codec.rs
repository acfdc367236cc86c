//! Bracket references embedding catalog ids in DSL lines.
//!
//! A reference is the id wrapped in square brackets, `[6f1c2a]`. Intent examples
//! use a two-part tag, `[New York]([loc_01])`, pairing the tagged span of the
//! example sentence with the entity id.

use regex::Regex;
use std::sync::LazyLock;

static REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").expect("Valid reference regex"));

static ENTITY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\(\[([^\]]+)\]\)").expect("Valid entity tag regex")
});

/// Wrap an id in a bracket reference.
///
/// No escaping is done; see [`is_encodable`].
///
/// # Examples
///
/// ```
/// use parlance_dsl::{decode_references, encode_reference};
///
/// let token = encode_reference("6f1c2a");
/// assert_eq!(token, "[6f1c2a]");
/// assert_eq!(decode_references(&token), vec!["6f1c2a"]);
/// ```
pub fn encode_reference(id: &str) -> String {
    format!("[{}]", id)
}

/// All referenced ids in `text`, left to right.
pub fn decode_references(text: &str) -> Vec<String> {
    REFERENCE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// The first referenced id in `text`, if any.
pub fn first_reference(text: &str) -> Option<&str> {
    REFERENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether `id` survives a round trip through a bracket reference unambiguously.
///
/// Empty ids and ids containing either bracket are rejected at the catalog boundary.
pub fn is_encodable(id: &str) -> bool {
    !id.is_empty() && !id.contains(['[', ']'])
}

/// The part of a DSL line before its `#` comment.
///
/// A `#` inside a bracket reference belongs to the id and does not start a comment.
///
/// # Examples
///
/// ```
/// use parlance_dsl::strip_comment;
///
/// assert_eq!(strip_comment("    - action: [a1]  # answers intent: greet"), "    - action: [a1]  ");
/// assert_eq!(strip_comment("- intent: [tag#1]"), "- intent: [tag#1]");
/// assert_eq!(strip_comment("# only a comment"), "");
/// ```
pub fn strip_comment(line: &str) -> &str {
    let mut depth = 0usize;
    for (index, c) in line.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '#' if depth == 0 => return &line[..index],
            _ => {}
        }
    }
    line
}

/// An entity annotation inside an intent example sentence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct EntityTag {
    /// The literal span of the example sentence
    value: String,
    /// The entity the span is tagged with
    entity_id: String,
}

impl EntityTag {
    /// Create a tag.
    pub fn new(value: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            entity_id: entity_id.into(),
        }
    }
}

/// Encode a tagged span as `[value]([entity_id])`.
///
/// # Examples
///
/// ```
/// use parlance_dsl::{EntityTag, decode_entity_tags, encode_entity_tag};
///
/// let sentence = format!("fly to {} tomorrow", encode_entity_tag("New York", "loc_01"));
/// assert_eq!(sentence, "fly to [New York]([loc_01]) tomorrow");
/// assert_eq!(decode_entity_tags(&sentence), vec![EntityTag::new("New York", "loc_01")]);
/// ```
pub fn encode_entity_tag(value: &str, entity_id: &str) -> String {
    format!("[{}]({})", value, encode_reference(entity_id))
}

/// All entity tags in `text`, left to right.
pub fn decode_entity_tags(text: &str) -> Vec<EntityTag> {
    ENTITY_TAG
        .captures_iter(text)
        .filter_map(|caps| match (caps.get(1), caps.get(2)) {
            (Some(value), Some(entity)) => Some(EntityTag::new(value.as_str(), entity.as_str())),
            _ => None,
        })
        .collect()
}

/// The example sentence with every tag replaced by its literal span.
pub fn strip_entity_tags(text: &str) -> String {
    ENTITY_TAG.replace_all(text, "$1").into_owned()
}
