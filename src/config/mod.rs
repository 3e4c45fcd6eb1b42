//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `WELLCYCLE` prefix and
//! nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use wellcycle::config::AppConfig;
//!
//! let config = AppConfig::load_validated().expect("Invalid configuration");
//!
//! println!("Cycle length: {} days", config.tracker.cycle_length_days);
//! ```

mod database;
mod error;
mod logging;
mod tracker;

pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use tracker::TrackerConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// in-memory setup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Forecasting settings
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Database configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `WELLCYCLE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `WELLCYCLE__TRACKER__CYCLE_LENGTH_DAYS=30` -> `tracker.cycle_length_days = 30`
    /// - `WELLCYCLE__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WELLCYCLE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration and reject it unless every value is valid
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` for unparseable values and
    /// `ConfigError::ValidationFailed` for out-of-range ones.
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.tracker.validate()?;
        self.database.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
