use parlance::{
    CatalogFile, CatalogKind, DeclarationFile, DefinitionParser, Dialect, ParlanceErrorKind,
    Step, StepKind, read_text,
};
use std::io::Write;

const DECLARATION: &str = r#"
name = "Greet User"
dialect = "story"
description = "Says hello"

[[steps]]
id = "65a1f0c2b9e4"
kind = "intent"

[[steps]]
id = "65a1f0c2b9f7"
kind = "response"
"#;

const CATALOG: &str = r#"
[[entries]]
id = "65a1f0c2b9e4"
name = "greet"
kind = "intent"

[[entries]]
id = "65a1f0c2b9f7"
name = "utter_greet"
kind = "response"
description = "Hello there"
"#;

#[test]
fn test_declaration_file_builds_visual_declaration() {
    let file = DeclarationFile::from_toml_str(DECLARATION).unwrap();
    assert_eq!(file.dialect(), &Dialect::Story);
    assert_eq!(file.steps()[1].kind, StepKind::Response);

    let declaration = file.into_declaration().unwrap();
    assert_eq!(
        declaration.raw_text(),
        "- story: greet_user\n  steps:\n    - intent: [65a1f0c2b9e4]\n    - action: [65a1f0c2b9f7]"
    );
}

#[test]
fn test_declaration_file_defaults_to_rule() {
    let file = DeclarationFile::from_toml_str("name = \"x\"").unwrap();
    assert_eq!(file.dialect(), &Dialect::Rule);
    assert!(file.steps().is_empty());
}

#[test]
fn test_unencodable_step_id_is_rejected() {
    let file = DeclarationFile::from_toml_str(
        "name = \"x\"\n[[steps]]\nid = \"a]b\"\nkind = \"intent\"\n",
    )
    .unwrap();
    let err = file.into_declaration().unwrap_err();
    assert!(matches!(err.kind(), ParlanceErrorKind::Definition(_)));
}

#[test]
fn test_bad_toml_is_a_toml_error() {
    let err = DeclarationFile::from_toml_str("name = ").unwrap_err();
    assert!(matches!(err.kind(), ParlanceErrorKind::Toml(_)));
}

#[test]
fn test_missing_file_is_a_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_text(&dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err.kind(), ParlanceErrorKind::File(_)));
    assert!(err.to_string().contains("missing.txt"));
}

#[tokio::test]
async fn test_catalog_file_resolves_parsed_steps() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CATALOG.as_bytes()).unwrap();

    let catalog_file = CatalogFile::load(file.path()).unwrap();
    assert_eq!(catalog_file.entries()[0].kind(), &CatalogKind::Intent);
    let catalog = catalog_file.into_catalog().unwrap();

    let steps = DefinitionParser::new(&catalog)
        .parse_steps("- rule: greet\n  steps:\n    - intent: [65a1f0c2b9e4]\n    - action: [65a1f0c2b9f7]")
        .await;
    assert_eq!(
        steps,
        vec![Step::intent("65a1f0c2b9e4"), Step::response("65a1f0c2b9f7")]
    );
    assert_eq!(steps[1].label(), "utter_greet");
}
