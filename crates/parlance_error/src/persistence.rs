//! Persistence collaborator error types.

/// Kinds of persistence errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PersistenceErrorKind {
    /// No stored declaration with this id
    #[display("Declaration not found: {}", _0)]
    NotFound(String),
    /// Backend refused the create or update
    #[display("Declaration rejected: {}", _0)]
    Rejected(String),
    /// Backend could not be reached
    #[display("Persistence unavailable: {}", _0)]
    Unavailable(String),
}

/// Persistence error with location tracking.
///
/// # Examples
///
/// ```
/// use parlance_error::{PersistenceError, PersistenceErrorKind};
///
/// let err = PersistenceError::new(PersistenceErrorKind::NotFound("42".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Persistence Error: {} at line {} in {}", kind, line, file)]
pub struct PersistenceError {
    /// The kind of error that occurred
    pub kind: PersistenceErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PersistenceError {
    /// Create a new persistence error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PersistenceErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
