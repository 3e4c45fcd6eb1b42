//! Logging configuration and subscriber setup

use serde::Deserialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::error::{ConfigError, ValidationError};

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of compact text
    #[serde(default)]
    pub json: bool,
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| ValidationError::InvalidLogLevel(e.to_string()))
    }

    /// Builds the filter. `RUST_LOG` wins over the configured level.
    pub fn env_filter(&self) -> EnvFilter {
        if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(&self.level)
        }
    }

    /// Installs the global tracing subscriber.
    pub fn init_tracing(&self) -> Result<(), ConfigError> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let result = if self.json {
            registry.with(fmt::layer().json()).try_init()
        } else {
            registry
                .with(fmt::layer().with_target(false).compact())
                .try_init()
        };
        result.map_err(|e| ConfigError::Logging(e.to_string()))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
