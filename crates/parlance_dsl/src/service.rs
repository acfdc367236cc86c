//! Load and save declarations through the persistence collaborator.

use crate::{Declaration, DeclarationEvent, DeclarationEvents, DefinitionParser, ParserConfig};
use parlance_core::Dialect;
use parlance_error::ParlanceResult;
use parlance_interface::{CatalogLookup, DeclarationRepository, StoredDeclaration};
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Ties a declaration repository, the catalog and the event bus together.
///
/// Saving publishes a [`DeclarationEvent`] so list views can refresh.
///
/// # Examples
///
/// ```
/// use parlance_core::{Dialect, Step};
/// use parlance_dsl::{
///     Declaration, DeclarationEvents, DeclarationService, InMemoryCatalog,
///     InMemoryDeclarationRepository,
/// };
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let service = DeclarationService::new(
///     Arc::new(InMemoryDeclarationRepository::new()),
///     Arc::new(InMemoryCatalog::new()),
///     DeclarationEvents::default(),
/// );
///
/// let mut rule = Declaration::new("Greet", Dialect::Rule);
/// rule.push_step(Step::intent("i1"))?;
/// rule.push_step(Step::action("a1"))?;
/// let stored = service.save(&mut rule, "Says hello").await?;
/// assert_eq!(rule.id().as_deref(), Some(stored.id().as_str()));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DeclarationService {
    repository: Arc<dyn DeclarationRepository>,
    catalog: Arc<dyn CatalogLookup>,
    events: DeclarationEvents,
    parser_config: ParserConfig,
}

impl DeclarationService {
    /// Create a service over the given collaborators.
    pub fn new(
        repository: Arc<dyn DeclarationRepository>,
        catalog: Arc<dyn CatalogLookup>,
        events: DeclarationEvents,
    ) -> Self {
        Self {
            repository,
            catalog,
            events,
            parser_config: ParserConfig::default(),
        }
    }

    /// Use the given parser configuration for hydration and submission.
    pub fn with_parser_config(mut self, config: ParserConfig) -> Self {
        self.parser_config = config;
        self
    }

    /// The event bus saves are published on.
    pub fn events(&self) -> &DeclarationEvents {
        &self.events
    }

    /// A parser over this service's catalog.
    pub fn parser(&self) -> DefinitionParser<'_> {
        DefinitionParser::new(self.catalog.as_ref()).with_config(self.parser_config.clone())
    }

    /// Load a stored declaration and hydrate it into visual mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot produce the declaration.
    #[instrument(skip(self))]
    pub async fn load(&self, id: &str) -> ParlanceResult<Declaration> {
        let stored = self.repository.get_by_id(id).await?;
        Ok(Declaration::hydrate(&stored, self.parser()).await)
    }

    /// List stored declarations of a dialect.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be listed.
    pub async fn list(&self, dialect: Dialect) -> ParlanceResult<Vec<StoredDeclaration>> {
        self.repository.list(dialect).await
    }

    /// Validate, then create or update the declaration.
    ///
    /// A first save records the backend id on `declaration`. On failure the
    /// declaration is left as it was and no event is published.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the repository rejects the request.
    #[instrument(skip_all, fields(name = %declaration.name(), dialect = %declaration.dialect()))]
    pub async fn save(
        &self,
        declaration: &mut Declaration,
        description: &str,
    ) -> ParlanceResult<StoredDeclaration> {
        let payload = declaration.to_payload(description, &self.parser()).await?;
        let dialect = *declaration.dialect();

        let result = match declaration.id() {
            Some(id) => self.repository.update(id, &payload).await,
            None => self.repository.create(dialect, &payload).await,
        };
        let stored = result.map_err(|e| {
            error!(error = %e, "Failed to save declaration");
            e
        })?;

        let id = stored.id().clone();
        let event = if declaration.id().is_some() {
            DeclarationEvent::Updated { id, dialect }
        } else {
            declaration.set_id(id.clone());
            DeclarationEvent::Created { id, dialect }
        };
        info!(id = %stored.id(), "Saved declaration");
        self.events.publish(event);
        Ok(stored)
    }
}
