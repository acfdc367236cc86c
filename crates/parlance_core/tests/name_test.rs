use parlance_core::{DeclarationName, PLACEHOLDER_NAME, normalize_name};
use proptest::prelude::*;

#[test]
fn test_placeholder_is_already_normalized() {
    assert_eq!(normalize_name(PLACEHOLDER_NAME), PLACEHOLDER_NAME);
}

#[test]
fn test_symbols_only_title_falls_back() {
    let name = DeclarationName::from_title("!!! ???");
    assert!(name.is_placeholder());
    assert_eq!(name.to_string(), PLACEHOLDER_NAME);
}

proptest! {
    #[test]
    fn test_normalization_is_idempotent(title in any::<String>()) {
        let once = normalize_name(&title);
        prop_assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn test_normalized_names_use_identifier_charset(title in "\\PC{0,40}") {
        let normalized = normalize_name(&title);
        prop_assert!(normalized.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!normalized.starts_with('_'));
        prop_assert!(!normalized.ends_with('_'));
        prop_assert!(!normalized.contains("__"));
    }
}
