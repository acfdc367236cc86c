//! Catalog lookup error types.

/// Kinds of catalog errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum CatalogErrorKind {
    /// Catalog backend could not be reached
    #[display("Catalog unavailable: {}", _0)]
    Unavailable(String),
    /// Identifier is empty or contains reference delimiters
    #[display("Invalid catalog id: '{}'", _0)]
    InvalidId(String),
    /// An entry with the same kind and id already exists
    #[display("Duplicate catalog entry: {}", _0)]
    Duplicate(String),
}

/// Catalog error with location tracking.
///
/// # Examples
///
/// ```
/// use parlance_error::{CatalogError, CatalogErrorKind};
///
/// let err = CatalogError::new(CatalogErrorKind::InvalidId("a]b".to_string()));
/// assert!(format!("{}", err).contains("Invalid catalog id"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Catalog Error: {} at line {} in {}", kind, line, file)]
pub struct CatalogError {
    /// The kind of error that occurred
    pub kind: CatalogErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl CatalogError {
    /// Create a new catalog error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: CatalogErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
