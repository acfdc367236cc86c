//! Declaration name normalization.

use serde::{Deserialize, Serialize};

/// Name used when a title normalizes to nothing.
pub const PLACEHOLDER_NAME: &str = "untitled";

/// Normalize a free-text title into a declaration identifier.
///
/// Lowercases, turns whitespace runs into a single underscore, strips anything
/// outside `[a-z0-9_]`, collapses repeated underscores and trims underscores from
/// both ends. The result may be empty.
///
/// # Examples
///
/// ```
/// use parlance_core::normalize_name;
///
/// assert_eq!(normalize_name("  Greet the User! "), "greet_the_user");
/// assert_eq!(normalize_name("Ask -- Weather__Now"), "ask_weather_now");
/// assert_eq!(normalize_name("???"), "");
/// ```
pub fn normalize_name(title: &str) -> String {
    let mut normalized = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars() {
        if c.is_whitespace() || c == '_' {
            pending_separator = true;
            continue;
        }
        for lower in c.to_lowercase() {
            if !(lower.is_ascii_lowercase() || lower.is_ascii_digit()) {
                continue;
            }
            if pending_separator && !normalized.is_empty() {
                normalized.push('_');
            }
            pending_separator = false;
            normalized.push(lower);
        }
    }

    normalized
}

/// A normalized declaration name.
///
/// Falls back to [`PLACEHOLDER_NAME`] when the title normalizes to an empty string,
/// and remembers that it did so the declaration check can flag it.
///
/// # Examples
///
/// ```
/// use parlance_core::DeclarationName;
///
/// let name = DeclarationName::from_title("Order Pizza");
/// assert_eq!(name.as_str(), "order_pizza");
/// assert!(!name.is_placeholder());
///
/// let empty = DeclarationName::from_title("   ");
/// assert_eq!(empty.as_str(), "untitled");
/// assert!(empty.is_placeholder());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", value)]
pub struct DeclarationName {
    value: String,
    placeholder: bool,
}

impl DeclarationName {
    /// Normalize a free-text title.
    pub fn from_title(title: &str) -> Self {
        let value = normalize_name(title);
        if value.is_empty() {
            Self {
                value: PLACEHOLDER_NAME.to_string(),
                placeholder: true,
            }
        } else {
            Self {
                value,
                placeholder: false,
            }
        }
    }

    /// The normalized identifier.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whether the title normalized to nothing and the placeholder was used.
    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

impl Default for DeclarationName {
    fn default() -> Self {
        Self::from_title("")
    }
}

impl AsRef<str> for DeclarationName {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_letters_are_stripped_after_lowercasing() {
        assert_eq!(normalize_name("Café Órder"), "caf_rder");
    }

    #[test]
    fn test_separators_survive_stripped_characters() {
        assert_eq!(normalize_name("check - balance"), "check_balance");
        assert_eq!(normalize_name("check-balance"), "checkbalance");
    }

    #[test]
    fn test_leading_and_trailing_separators_trimmed() {
        assert_eq!(normalize_name("__greet__"), "greet");
        assert_eq!(normalize_name("\t greet\n"), "greet");
    }

    #[test]
    fn test_digits_are_kept() {
        assert_eq!(normalize_name("Step 2 of 3"), "step_2_of_3");
    }
}
