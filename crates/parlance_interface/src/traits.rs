//! Collaborator traits consumed by the engine.

use crate::{DeclarationPayload, StoredDeclaration};
use async_trait::async_trait;
use parlance_core::{CatalogEntry, CatalogKind, Dialect};
use parlance_error::ParlanceResult;

/// Read access to the catalog of intents, actions, responses and entities.
///
/// A missing entry is `Ok(None)`; `Err` means the lookup itself failed.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Search entries of `kind` whose name matches `query`, at most `limit` results.
    async fn search_by_text(
        &self,
        kind: CatalogKind,
        query: &str,
        limit: usize,
    ) -> ParlanceResult<Vec<CatalogEntry>>;

    /// Fetch a single entry of `kind` by id.
    async fn get_by_id(&self, kind: CatalogKind, id: &str) -> ParlanceResult<Option<CatalogEntry>>;
}

/// Storage for rule and story declarations.
#[async_trait]
pub trait DeclarationRepository: Send + Sync {
    /// Store a new declaration of the given dialect.
    async fn create(
        &self,
        dialect: Dialect,
        payload: &DeclarationPayload,
    ) -> ParlanceResult<StoredDeclaration>;

    /// Replace the payload of an existing declaration.
    async fn update(&self, id: &str, payload: &DeclarationPayload)
    -> ParlanceResult<StoredDeclaration>;

    /// Load a declaration by id.
    async fn get_by_id(&self, id: &str) -> ParlanceResult<StoredDeclaration>;

    /// List stored declarations of a dialect.
    async fn list(&self, dialect: Dialect) -> ParlanceResult<Vec<StoredDeclaration>>;
}
