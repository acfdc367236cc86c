//! TOML error types.

/// TOML deserialization error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("TOML Error: {} at line {} in {}", message, line, file)]
pub struct TomlError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl TomlError {
    /// Create a new TomlError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use parlance_error::TomlError;
    ///
    /// let err = TomlError::new("expected a table");
    /// assert!(err.message.contains("expected a table"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
