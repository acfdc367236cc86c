use parlance_core::{CatalogEntry, CatalogKind, Dialect};
use parlance_dsl::{InMemoryCatalog, InMemoryDeclarationRepository};
use parlance_error::{CatalogErrorKind, ParlanceErrorKind, PersistenceErrorKind};
use parlance_interface::{CatalogLookup, DeclarationPayload, DeclarationRepository};

fn catalog_kind(err: &parlance_error::ParlanceError) -> CatalogErrorKind {
    match err.kind() {
        ParlanceErrorKind::Catalog(e) => e.kind.clone(),
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_catalog_rejects_bracketed_ids() {
    let catalog = InMemoryCatalog::new();
    let err = catalog
        .insert(CatalogEntry::new("a]b", "broken", CatalogKind::Action))
        .await
        .unwrap_err();
    assert_eq!(catalog_kind(&err), CatalogErrorKind::InvalidId("a]b".to_string()));
    assert!(catalog.is_empty().await);
}

#[tokio::test]
async fn test_catalog_rejects_duplicates_within_kind() {
    let catalog = InMemoryCatalog::new();
    catalog
        .insert(CatalogEntry::new("x1", "greet", CatalogKind::Intent))
        .await
        .unwrap();
    catalog
        .insert(CatalogEntry::new("x1", "utter_greet", CatalogKind::Response))
        .await
        .unwrap();

    let err = catalog
        .insert(CatalogEntry::new("x1", "again", CatalogKind::Intent))
        .await
        .unwrap_err();
    assert!(matches!(catalog_kind(&err), CatalogErrorKind::Duplicate(_)));
    assert_eq!(catalog.len().await, 2);
}

#[tokio::test]
async fn test_catalog_lookup_is_scoped_by_kind() {
    let catalog = InMemoryCatalog::from_entries([CatalogEntry::new("x1", "greet", CatalogKind::Intent)])
        .unwrap();
    assert!(catalog.get_by_id(CatalogKind::Intent, "x1").await.unwrap().is_some());
    assert!(catalog.get_by_id(CatalogKind::Action, "x1").await.unwrap().is_none());
    assert!(
        catalog
            .search_by_text(CatalogKind::Action, "greet", 10)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_repository_assigns_ids_and_filters_by_dialect() {
    let repository = InMemoryDeclarationRepository::new();
    let payload = DeclarationPayload {
        name: "greet".to_string(),
        define: "- rule: greet".to_string(),
        ..Default::default()
    };

    let rule = repository.create(Dialect::Rule, &payload).await.unwrap();
    let story = repository.create(Dialect::Story, &payload).await.unwrap();
    assert_ne!(rule.id(), story.id());
    assert_eq!(repository.list(Dialect::Story).await.unwrap(), vec![story]);
}

#[tokio::test]
async fn test_concurrent_creates_get_distinct_sequential_ids() {
    let repository = InMemoryDeclarationRepository::new();
    let payload = DeclarationPayload {
        name: "greet".to_string(),
        define: "- rule: greet".to_string(),
        ..Default::default()
    };

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repository = repository.clone();
            let payload = payload.clone();
            tokio::spawn(async move { repository.create(Dialect::Rule, &payload).await })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        let stored = handle.await.unwrap().unwrap();
        ids.push(stored.id().parse::<u64>().unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=8).collect::<Vec<u64>>());
    assert_eq!(repository.len().await, 8);
}

#[tokio::test]
async fn test_repository_rejects_empty_definition() {
    let repository = InMemoryDeclarationRepository::new();
    let payload = DeclarationPayload {
        name: "greet".to_string(),
        ..Default::default()
    };
    let err = repository.create(Dialect::Rule, &payload).await.unwrap_err();
    assert!(matches!(
        err.kind(),
        ParlanceErrorKind::Persistence(e) if matches!(e.kind, PersistenceErrorKind::Rejected(_))
    ));
}

#[tokio::test]
async fn test_repository_update_of_missing_id_fails() {
    let repository = InMemoryDeclarationRepository::new();
    let payload = DeclarationPayload {
        name: "greet".to_string(),
        define: "- rule: greet".to_string(),
        ..Default::default()
    };
    assert!(repository.update("9", &payload).await.is_err());
    assert!(repository.update("not-a-number", &payload).await.is_err());
}
