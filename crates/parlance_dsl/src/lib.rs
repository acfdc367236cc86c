//! Step-sequence DSL engine for Parlance rules and stories.
//!
//! A rule or story is an ordered list of intent, action and response steps, edited
//! either visually or as DSL text:
//!
//! ```text
//! - rule: greet_user
//!   steps:
//!     - intent: [65a1f0c2b9e4]
//!     - action: [65a1f0c2b9f7]
//! ```
//!
//! # Pipeline
//!
//! - [`generate`] renders steps to text
//! - [`DefinitionParser`] reads text back into steps, resolving names in the catalog
//! - [`validate`] checks ordering rules for the dialect
//! - [`Declaration`] holds the current source of truth and switches modes
//! - [`DeclarationService`] loads and saves through a [`DeclarationRepository`]
//!
//! [`DeclarationRepository`]: parlance_interface::DeclarationRepository

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod config;
mod declaration;
mod events;
mod generator;
mod in_memory;
mod parser;
mod search;
mod service;
mod validator;

pub use codec::{
    EntityTag, decode_entity_tags, decode_references, encode_entity_tag, encode_reference,
    first_reference, is_encodable, strip_comment, strip_entity_tags,
};
pub use config::{EventsConfig, ParlanceConfig, ParserConfig, SearchConfig};
pub use declaration::{Declaration, EditMode, EditSource};
pub use events::{DeclarationEvent, DeclarationEvents};
pub use generator::{STEP_INDENT, STEPS_LINE, generate, header_line, rename_header, step_line};
pub use in_memory::{InMemoryCatalog, InMemoryDeclarationRepository};
pub use parser::{
    DefinitionParser, NameSource, ParsedStep, Unresolved, fallback_name, parse_header, scan_steps,
};
pub use search::{CatalogSearch, SearchOutcome};
pub use service::DeclarationService;
pub use validator::{IssueKind, ValidationIssue, ValidationReport, validate};
