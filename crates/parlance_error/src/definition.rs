//! Declaration editing error types.

/// Specific error conditions for declaration editing and submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DefinitionErrorKind {
    /// Operation requires the other editing mode
    #[display("Operation requires {} editing mode", _0)]
    ModeMismatch(String),
    /// Step index does not address an existing step
    #[display("Step index {} out of range for {} steps", index, len)]
    StepIndexOutOfRange {
        /// Requested index (0-based)
        index: usize,
        /// Number of steps present
        len: usize,
    },
    /// Step id cannot be embedded in a bracket reference
    #[display("Identifier '{}' cannot be embedded in a reference", _0)]
    UnencodableId(String),
    /// Submission blocked by validation errors
    #[display("Declaration has {} validation error(s): {}", count, summary)]
    ValidationFailed {
        /// Number of blocking errors
        count: usize,
        /// Messages joined for display
        summary: String,
    },
}

/// Error type for declaration operations.
///
/// # Examples
///
/// ```
/// use parlance_error::{DefinitionError, DefinitionErrorKind};
///
/// let err = DefinitionError::new(DefinitionErrorKind::ModeMismatch("visual".into()));
/// assert!(format!("{}", err).contains("visual"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Definition Error: {} at line {} in {}", kind, line, file)]
pub struct DefinitionError {
    /// The specific error condition
    pub kind: DefinitionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl DefinitionError {
    /// Create a new DefinitionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DefinitionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
