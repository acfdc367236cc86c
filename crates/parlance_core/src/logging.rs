//! Structured logging initialisation.

use parlance_error::{ConfigError, ParlanceResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration from the `[logging]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset (e.g. "info", "parlance_dsl=debug")
    #[serde(default = "default_level")]
    level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Set the default filter directive.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Enable JSON-formatted logs.
    pub fn with_json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Logs are written to stderr.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> ParlanceResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };
    result.map_err(|e| ConfigError::new(format!("Failed to initialize logging: {}", e)))?;

    tracing::debug!(level = %config.level, json = config.json, "Logging initialized");
    Ok(())
}
