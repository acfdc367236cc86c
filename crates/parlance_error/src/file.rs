//! File error types.

/// File access error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("File Error: {} at line {} in {}", message, line, file)]
pub struct FileError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl FileError {
    /// Create a new FileError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use parlance_error::FileError;
    ///
    /// let err = FileError::new("Failed to read steps.toml: No such file or directory");
    /// assert!(err.message.contains("steps.toml"));
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
