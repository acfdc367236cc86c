//! Generate-then-parse round trips through an in-memory catalog.

use parlance_core::{CatalogEntry, DeclarationName, Dialect, Step, StepKind};
use parlance_dsl::{DefinitionParser, InMemoryCatalog, generate};
use proptest::prelude::*;
use std::collections::HashSet;

fn step_kind() -> impl Strategy<Value = StepKind> {
    prop_oneof![
        Just(StepKind::Intent),
        Just(StepKind::Action),
        Just(StepKind::Response),
    ]
}

/// Ids are prefixed by kind so an id never lives in two catalogs.
fn step() -> impl Strategy<Value = Step> {
    (step_kind(), "[a-z0-9]{1,12}").prop_map(|(kind, suffix)| {
        let prefix = match kind {
            StepKind::Intent => "i",
            StepKind::Action => "a",
            StepKind::Response => "r",
        };
        Step::new(format!("{}{}", prefix, suffix), kind)
    })
}

fn catalog_for(steps: &[Step]) -> InMemoryCatalog {
    let mut seen = HashSet::new();
    let entries: Vec<CatalogEntry> = steps
        .iter()
        .filter(|step| seen.insert(step.id().clone()))
        .map(|step| CatalogEntry::new(step.id(), format!("name {}", step.id()), step.kind().catalog_kind()))
        .collect();
    InMemoryCatalog::from_entries(entries).unwrap()
}

fn round_trip(dialect: Dialect, steps: &[Step]) -> Vec<Step> {
    let catalog = catalog_for(steps);
    let text = generate(&DeclarationName::from_title("round trip"), dialect, steps);
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(DefinitionParser::new(&catalog).parse_steps(&text))
}

proptest! {
    #[test]
    fn rule_steps_survive_generate_and_parse(steps in prop::collection::vec(step(), 0..12)) {
        prop_assert_eq!(round_trip(Dialect::Rule, &steps), steps);
    }

    #[test]
    fn story_steps_survive_generate_and_parse(steps in prop::collection::vec(step(), 0..12)) {
        prop_assert_eq!(round_trip(Dialect::Story, &steps), steps);
    }

    #[test]
    fn generation_is_deterministic(steps in prop::collection::vec(step(), 0..8)) {
        let name = DeclarationName::from_title("same");
        prop_assert_eq!(
            generate(&name, Dialect::Rule, &steps),
            generate(&name, Dialect::Rule, &steps)
        );
    }
}

#[test]
fn test_resolved_steps_carry_catalog_names() {
    let steps = vec![Step::intent("i1"), Step::response("r1")];
    let parsed = round_trip(Dialect::Rule, &steps);
    assert_eq!(parsed[0].display_name().as_deref(), Some("name i1"));
    assert_eq!(parsed[1].display_name().as_deref(), Some("name r1"));
    assert_eq!(parsed[1].kind(), &StepKind::Response);
}
