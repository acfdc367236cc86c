//! In-memory collaborators for tests, demos and the CLI.
//!
//! Both stores keep their data in a map behind a tokio `RwLock` shared through
//! `Arc`, so clones see the same data. All data is lost when the last clone drops.

use crate::is_encodable;
use async_trait::async_trait;
use parlance_core::{CatalogEntry, CatalogKind, Dialect};
use parlance_error::{
    CatalogError, CatalogErrorKind, ParlanceResult, PersistenceError, PersistenceErrorKind,
};
use parlance_interface::{CatalogLookup, DeclarationPayload, DeclarationRepository, StoredDeclaration};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// A catalog held in memory.
///
/// # Example
/// ```
/// use parlance_core::{CatalogEntry, CatalogKind};
/// use parlance_dsl::InMemoryCatalog;
/// use parlance_interface::CatalogLookup;
///
/// #[tokio::main]
/// async fn main() {
///     let catalog = InMemoryCatalog::from_entries([
///         CatalogEntry::new("i1", "greet", CatalogKind::Intent),
///     ])
///     .unwrap();
///     let entry = catalog.get_by_id(CatalogKind::Intent, "i1").await.unwrap();
///     assert_eq!(entry.unwrap().name(), "greet");
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    entries: Arc<RwLock<HashMap<(CatalogKind, String), CatalogEntry>>>,
}

fn check_entry(
    entries: &HashMap<(CatalogKind, String), CatalogEntry>,
    entry: &CatalogEntry,
) -> Result<(CatalogKind, String), CatalogError> {
    if !is_encodable(entry.id()) {
        return Err(CatalogError::new(CatalogErrorKind::InvalidId(
            entry.id().clone(),
        )));
    }
    let key = (*entry.kind(), entry.id().clone());
    if entries.contains_key(&key) {
        return Err(CatalogError::new(CatalogErrorKind::Duplicate(format!(
            "{} {}",
            entry.kind(),
            entry.id()
        ))));
    }
    Ok(key)
}

impl InMemoryCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from entries.
    ///
    /// # Errors
    ///
    /// Returns an error on an unencodable id or a duplicate `(kind, id)` pair.
    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> ParlanceResult<Self> {
        let mut map = HashMap::new();
        for entry in entries {
            let key = check_entry(&map, &entry)?;
            map.insert(key, entry);
        }
        Ok(Self {
            entries: Arc::new(RwLock::new(map)),
        })
    }

    /// Add an entry.
    ///
    /// # Errors
    ///
    /// Returns an error on an unencodable id or a duplicate `(kind, id)` pair.
    pub async fn insert(&self, entry: CatalogEntry) -> ParlanceResult<()> {
        let mut entries = self.entries.write().await;
        let key = check_entry(&entries, &entry)?;
        entries.insert(key, entry);
        Ok(())
    }

    /// Number of entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the catalog has no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CatalogLookup for InMemoryCatalog {
    #[instrument(skip(self))]
    async fn search_by_text(
        &self,
        kind: CatalogKind,
        query: &str,
        limit: usize,
    ) -> ParlanceResult<Vec<CatalogEntry>> {
        let needle = query.to_lowercase();
        let entries = self.entries.read().await;
        let mut hits: Vec<CatalogEntry> = entries
            .values()
            .filter(|entry| *entry.kind() == kind)
            .filter(|entry| entry.name().to_lowercase().contains(&needle))
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
        hits.truncate(limit);
        debug!(count = hits.len(), "Catalog search");
        Ok(hits)
    }

    async fn get_by_id(&self, kind: CatalogKind, id: &str) -> ParlanceResult<Option<CatalogEntry>> {
        Ok(self
            .entries
            .read()
            .await
            .get(&(kind, id.to_string()))
            .cloned())
    }
}

/// A declaration store held in memory, assigning sequential numeric ids.
#[derive(Debug, Clone)]
pub struct InMemoryDeclarationRepository {
    declarations: Arc<RwLock<BTreeMap<u64, StoredDeclaration>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryDeclarationRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self {
            declarations: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Number of stored declarations.
    pub async fn len(&self) -> usize {
        self.declarations.read().await.len()
    }

    /// Whether nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.declarations.read().await.is_empty()
    }
}

impl Default for InMemoryDeclarationRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_id(id: &str) -> Result<u64, PersistenceError> {
    id.parse()
        .map_err(|_| PersistenceError::new(PersistenceErrorKind::NotFound(id.to_string())))
}

fn check_payload(payload: &DeclarationPayload) -> Result<(), PersistenceError> {
    if payload.name.trim().is_empty() {
        return Err(PersistenceError::new(PersistenceErrorKind::Rejected(
            "name is required".to_string(),
        )));
    }
    if payload.define.trim().is_empty() {
        return Err(PersistenceError::new(PersistenceErrorKind::Rejected(
            "define is required".to_string(),
        )));
    }
    Ok(())
}

#[async_trait]
impl DeclarationRepository for InMemoryDeclarationRepository {
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    async fn create(
        &self,
        dialect: Dialect,
        payload: &DeclarationPayload,
    ) -> ParlanceResult<StoredDeclaration> {
        check_payload(payload)?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        let stored = StoredDeclaration::new(id.to_string(), dialect, payload.clone());
        self.declarations.write().await.insert(id, stored.clone());
        debug!(id, "Stored declaration");
        Ok(stored)
    }

    #[instrument(skip(self, payload), fields(name = %payload.name))]
    async fn update(
        &self,
        id: &str,
        payload: &DeclarationPayload,
    ) -> ParlanceResult<StoredDeclaration> {
        check_payload(payload)?;
        let key = parse_id(id)?;

        let mut declarations = self.declarations.write().await;
        let existing = declarations
            .get(&key)
            .cloned()
            .ok_or_else(|| PersistenceError::new(PersistenceErrorKind::NotFound(id.to_string())))?;
        let updated = existing.with_payload(payload.clone());
        declarations.insert(key, updated.clone());
        Ok(updated)
    }

    async fn get_by_id(&self, id: &str) -> ParlanceResult<StoredDeclaration> {
        let key = parse_id(id)?;
        self.declarations
            .read()
            .await
            .get(&key)
            .cloned()
            .ok_or_else(|| PersistenceError::new(PersistenceErrorKind::NotFound(id.to_string())).into())
    }

    async fn list(&self, dialect: Dialect) -> ParlanceResult<Vec<StoredDeclaration>> {
        Ok(self
            .declarations
            .read()
            .await
            .values()
            .filter(|stored| *stored.dialect() == dialect)
            .cloned()
            .collect())
    }
}
