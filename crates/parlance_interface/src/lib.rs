//! Trait definitions for the collaborators of the Parlance engine.
//!
//! The engine never talks to a backend directly. It reads catalog entries through
//! [`CatalogLookup`] and stores declarations through [`DeclarationRepository`].

mod traits;
mod types;

pub use traits::{CatalogLookup, DeclarationRepository};
pub use types::{DeclarationPayload, StoredDeclaration};
