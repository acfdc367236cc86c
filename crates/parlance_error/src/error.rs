//! Top-level error wrapper types.

use crate::{
    CatalogError, ConfigError, DefinitionError, FileError, JsonError, PersistenceError, TomlError,
};

/// Every error condition a Parlance operation can surface.
///
/// # Examples
///
/// ```
/// use parlance_error::{ParlanceError, ConfigError};
///
/// let config_err = ConfigError::new("Missing field");
/// let err: ParlanceError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ParlanceErrorKind {
    /// Declaration editing or submission error
    #[from(DefinitionError)]
    Definition(DefinitionError),
    /// Catalog lookup error
    #[from(CatalogError)]
    Catalog(CatalogError),
    /// Persistence collaborator error
    #[from(PersistenceError)]
    Persistence(PersistenceError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// TOML deserialization error
    #[from(TomlError)]
    Toml(TomlError),
    /// File access error
    #[from(FileError)]
    File(FileError),
}

/// Parlance error with kind discrimination.
///
/// # Examples
///
/// ```
/// use parlance_error::{ParlanceResult, ConfigError};
///
/// fn might_fail() -> ParlanceResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Parlance Error: {}", _0)]
pub struct ParlanceError(Box<ParlanceErrorKind>);

impl ParlanceError {
    /// Create a new error from a kind.
    pub fn new(kind: ParlanceErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ParlanceErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ParlanceErrorKind
impl<T> From<T> for ParlanceError
where
    T: Into<ParlanceErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Parlance operations.
pub type ParlanceResult<T> = std::result::Result<T, ParlanceError>;
