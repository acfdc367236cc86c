//! Declaration dialects.

use serde::{Deserialize, Serialize};

/// Which ruleset a declaration follows.
///
/// Rules strictly alternate intents with their reactions; stories are a permissive
/// sequence where ordering advice is only a warning.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Dialect {
    /// Strict alternation
    #[display("rule")]
    #[default]
    Rule,
    /// Permissive sequence
    #[display("story")]
    Story,
}

impl Dialect {
    /// The keyword used on the header line, `rule` or `story`.
    pub fn keyword(self) -> &'static str {
        match self {
            Dialect::Rule => "rule",
            Dialect::Story => "story",
        }
    }

    /// The header token including the list dash and colon, e.g. `- rule:`.
    pub fn header_token(self) -> String {
        format!("- {}:", self.keyword())
    }
}
