//! Debounced search-as-you-type over the catalog.

use crate::SearchConfig;
use parlance_core::{CatalogEntry, CatalogKind};
use parlance_interface::CatalogLookup;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Result of a debounced search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Matching entries; empty means "no results"
    Results(Vec<CatalogEntry>),
    /// A newer search started before this one finished
    Superseded,
}

impl SearchOutcome {
    /// The entries, or `None` if superseded.
    pub fn results(&self) -> Option<&[CatalogEntry]> {
        match self {
            SearchOutcome::Results(entries) => Some(entries),
            SearchOutcome::Superseded => None,
        }
    }
}

/// Debounces catalog searches triggered by keystrokes.
///
/// Each call waits for the configured quiet period. If another call started in the
/// meantime the earlier one returns [`SearchOutcome::Superseded`] without touching the
/// catalog. Results arriving after a newer call started are discarded the same way,
/// so a late response can never overwrite fresher results. Clones share state.
#[derive(Clone)]
pub struct CatalogSearch {
    catalog: Arc<dyn CatalogLookup>,
    config: SearchConfig,
    latest: Arc<AtomicU64>,
}

impl CatalogSearch {
    /// Create a search over `catalog`.
    pub fn new(catalog: Arc<dyn CatalogLookup>, config: SearchConfig) -> Self {
        Self {
            catalog,
            config,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Search entries of `kind` matching `query` once typing settles.
    ///
    /// A failed lookup is logged and reported as an empty result list.
    #[instrument(skip(self), fields(debounce_ms = self.config.debounce_ms()))]
    pub async fn search(&self, kind: CatalogKind, query: &str) -> SearchOutcome {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(Duration::from_millis(*self.config.debounce_ms())).await;
        if self.latest.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "Search superseded during debounce");
            return SearchOutcome::Superseded;
        }

        let entries = match self
            .catalog
            .search_by_text(kind, query.trim(), *self.config.limit())
            .await
        {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Catalog search failed, showing no results");
                Vec::new()
            }
        };

        if self.latest.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "Discarding stale search results");
            return SearchOutcome::Superseded;
        }
        debug!(count = entries.len(), "Search complete");
        SearchOutcome::Results(entries)
    }
}
