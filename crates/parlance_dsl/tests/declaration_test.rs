use parlance_core::{CatalogEntry, CatalogKind, Dialect, Step};
use parlance_dsl::{
    Declaration, DefinitionParser, EditMode, InMemoryCatalog, IssueKind,
};
use parlance_error::{DefinitionErrorKind, ParlanceErrorKind};
use parlance_interface::{DeclarationPayload, StoredDeclaration};

fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::from_entries([
        CatalogEntry::new("i1", "greet", CatalogKind::Intent),
        CatalogEntry::new("i2", "goodbye", CatalogKind::Intent),
        CatalogEntry::new("a1", "action_check_order", CatalogKind::Action),
        CatalogEntry::new("r1", "utter_hello", CatalogKind::Response),
    ])
    .unwrap()
}

#[tokio::test]
async fn test_mode_switch_round_trip_keeps_steps() {
    let catalog = catalog();
    let parser = DefinitionParser::new(&catalog);
    let mut rule = Declaration::new("Greet User", Dialect::Rule);
    rule.push_step(Step::intent("i1")).unwrap();
    rule.push_step(Step::response("r1")).unwrap();
    let before = rule.steps().unwrap().to_vec();

    rule.switch_to_expert();
    assert_eq!(rule.mode(), EditMode::Expert);
    assert!(rule.steps().is_none());

    rule.switch_to_visual(&parser).await;
    assert_eq!(rule.mode(), EditMode::Visual);
    assert_eq!(rule.steps().unwrap(), before.as_slice());
}

#[tokio::test]
async fn test_header_name_adopted_when_switching_to_visual() {
    let catalog = catalog();
    let mut story = Declaration::from_text(
        "draft",
        Dialect::Story,
        "- story: Order Pizza\n  steps:\n    - intent: [i1]",
    );
    story.switch_to_visual(&DefinitionParser::new(&catalog)).await;
    assert_eq!(story.name().as_str(), "order_pizza");
}

#[tokio::test]
async fn test_empty_header_name_keeps_current_name() {
    let catalog = catalog();
    let mut story = Declaration::from_text("draft", Dialect::Story, "- story:\n  steps:");
    story.switch_to_visual(&DefinitionParser::new(&catalog)).await;
    assert_eq!(story.name().as_str(), "draft");
}

#[test]
fn test_expert_rename_only_touches_header() {
    let text = "# keep this comment\n- rule: old_name  # owner: support\n  steps:\n    - intent: [i1]   # trailing\n    - action: [a1]  # answers intent: greet\n";
    let mut rule = Declaration::from_text("old name", Dialect::Rule, text);
    rule.rename("Brand New");

    let renamed = rule.raw_text().into_owned();
    let old_lines: Vec<&str> = text.lines().collect();
    let new_lines: Vec<&str> = renamed.lines().collect();
    assert_eq!(old_lines.len(), new_lines.len());
    assert_eq!(new_lines[1], "- rule: brand_new  # owner: support");
    for (index, (old, new)) in old_lines.iter().zip(&new_lines).enumerate() {
        if index != 1 {
            assert_eq!(old, new);
        }
    }
    assert!(renamed.ends_with('\n'));
    assert_eq!(rule.name().as_str(), "brand_new");
    assert!(rule.validate().is_valid());
}

#[tokio::test]
async fn test_commented_action_line_stays_an_action() {
    let catalog = catalog();
    let parser = DefinitionParser::new(&catalog);
    let text = "- rule: greet\n  steps:\n    - intent: [i1]\n    - action: [a1]  # answers intent: greet\n";
    let rule = Declaration::from_text("greet", Dialect::Rule, text);
    assert!(rule.validate().is_valid());

    let payload = rule.to_payload("", &parser).await.unwrap();
    assert_eq!(payload.intents, vec!["i1"]);
    assert_eq!(payload.action, vec!["a1"]);
}

#[test]
fn test_expert_rename_without_header_leaves_text() {
    let text = "  steps:\n    - intent: [i1]";
    let mut rule = Declaration::from_text("x", Dialect::Rule, text);
    rule.rename("y");
    assert_eq!(rule.raw_text(), text);
    assert_eq!(rule.name().as_str(), "y");
}

#[test]
fn test_visual_rename_regenerates_header() {
    let mut rule = Declaration::new("first", Dialect::Rule);
    rule.push_step(Step::intent("i1")).unwrap();
    rule.rename("Second Try");
    assert!(rule.raw_text().starts_with("- rule: second_try\n"));
}

#[tokio::test]
async fn test_payload_dedupes_ids_by_kind() {
    let catalog = catalog();
    let parser = DefinitionParser::new(&catalog);
    let mut story = Declaration::new("Order", Dialect::Story);
    for step in [
        Step::intent("i1"),
        Step::response("r1"),
        Step::intent("i2"),
        Step::action("a1"),
        Step::intent("i1"),
        Step::response("r1"),
    ] {
        story.push_step(step).unwrap();
    }

    let payload = story.to_payload("ordering", &parser).await.unwrap();
    assert_eq!(payload.name, "order");
    assert_eq!(payload.description, "ordering");
    assert_eq!(payload.intents, vec!["i1", "i2"]);
    assert_eq!(payload.action, vec!["a1"]);
    assert_eq!(payload.responses, vec!["r1"]);
    assert_eq!(payload.define, story.raw_text());
}

#[tokio::test]
async fn test_expert_payload_uses_catalog_classification() {
    let catalog = catalog();
    let parser = DefinitionParser::new(&catalog);
    let text = "- rule: greet\n  steps:\n    - intent: [i1]\n    - action: [r1]  # hand written";
    let rule = Declaration::from_text("greet", Dialect::Rule, text);

    let payload = rule.to_payload("", &parser).await.unwrap();
    assert_eq!(payload.define, text);
    assert!(payload.action.is_empty());
    assert_eq!(payload.responses, vec!["r1"]);
}

#[tokio::test]
async fn test_invalid_declaration_produces_no_payload() {
    let catalog = catalog();
    let parser = DefinitionParser::new(&catalog);
    let mut rule = Declaration::new("greet", Dialect::Rule);
    let report = rule.push_step(Step::intent("i1")).unwrap();
    assert!(report.has_error(IssueKind::TrailingIntent));

    let err = rule.to_payload("", &parser).await.unwrap_err();
    match err.kind() {
        ParlanceErrorKind::Definition(definition) => {
            assert!(matches!(
                definition.kind,
                DefinitionErrorKind::ValidationFailed { count: 1, .. }
            ));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_hydrate_uses_stored_responses() {
    let catalog = InMemoryCatalog::new();
    let stored = StoredDeclaration::new(
        "7",
        Dialect::Rule,
        DeclarationPayload {
            name: "greet".to_string(),
            define: "- rule: greet\n  steps:\n    - intent: [i1]\n    - action: [r1]".to_string(),
            intents: vec!["i1".to_string()],
            responses: vec!["r1".to_string()],
            ..Default::default()
        },
    );

    let rule = Declaration::hydrate(&stored, DefinitionParser::new(&catalog)).await;
    assert_eq!(rule.id().as_deref(), Some("7"));
    assert_eq!(rule.name().as_str(), "greet");
    assert_eq!(
        rule.steps().unwrap(),
        &[Step::intent("i1"), Step::response("r1")]
    );
}
