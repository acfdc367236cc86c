//! Configuration for the DSL engine.
//!
//! Configuration is layered, later sources overriding earlier ones:
//! 1. Bundled defaults (`parlance.toml` shipped with the library)
//! 2. User config in home directory (`~/.config/parlance/parlance.toml`)
//! 3. User config in current directory (`./parlance.toml`)

use parlance_core::LoggingConfig;
use parlance_error::{ConfigError, ParlanceError, ParlanceResult};
use config::{Config, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../parlance.toml");

/// Settings for [`crate::DefinitionParser`].
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct ParserConfig {
    /// Characters of the id kept in a placeholder display name
    #[serde(default = "default_fallback_name_len")]
    fallback_name_len: usize,
}

fn default_fallback_name_len() -> usize {
    6
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            fallback_name_len: default_fallback_name_len(),
        }
    }
}

/// Settings for [`crate::CatalogSearch`].
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct SearchConfig {
    /// Quiet period before a query is sent (milliseconds)
    #[serde(default = "default_debounce_ms")]
    debounce_ms: u64,
    /// Maximum results per query
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_limit() -> usize {
    10
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            limit: default_limit(),
        }
    }
}

/// Settings for [`crate::DeclarationEvents`].
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct EventsConfig {
    /// Broadcast channel capacity
    #[serde(default = "default_capacity")]
    capacity: usize,
}

fn default_capacity() -> usize {
    64
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Top-level Parlance configuration.
///
/// # Example
///
/// ```no_run
/// use parlance_dsl::ParlanceConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ParlanceConfig::load()?;
/// println!("Debounce: {}ms", config.search().debounce_ms());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct ParlanceConfig {
    /// Parser settings
    #[serde(default)]
    parser: ParserConfig,
    /// Catalog search settings
    #[serde(default)]
    search: SearchConfig,
    /// Save event settings
    #[serde(default)]
    events: EventsConfig,
    /// Logging settings
    #[serde(default)]
    logging: LoggingConfig,
}

impl ParlanceConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ParlanceResult<Self> {
        debug!("Loading configuration from file");
        Self::deserialize_from(Config::builder().add_source(File::from(path.as_ref())))
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or has wrongly typed values.
    pub fn from_toml_str(toml: &str) -> ParlanceResult<Self> {
        Self::deserialize_from(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed.
    #[instrument]
    pub fn load() -> ParlanceResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/parlance/parlance.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("parlance").required(false));

        Self::deserialize_from(builder)
    }

    fn deserialize_from(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ParlanceResult<Self> {
        builder
            .build()
            .map_err(|e| {
                ParlanceError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ParlanceError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_defaults_match_code_defaults() {
        let bundled = ParlanceConfig::from_toml_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(bundled, ParlanceConfig::default());
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = ParlanceConfig::from_toml_str("[search]\ndebounce_ms = 50\n").unwrap();
        assert_eq!(*config.search().debounce_ms(), 50);
        assert_eq!(*config.search().limit(), 10);
        assert_eq!(*config.parser().fallback_name_len(), 6);
    }

    #[test]
    fn test_wrong_type_is_config_error() {
        assert!(ParlanceConfig::from_toml_str("[search]\nlimit = \"many\"\n").is_err());
    }
}
