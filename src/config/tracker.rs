//! Tracker configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::cycle::DEFAULT_CYCLE_LENGTH_DAYS;

const MIN_CYCLE_LENGTH_DAYS: i64 = 20;
const MAX_CYCLE_LENGTH_DAYS: i64 = 45;

/// Forecasting settings
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Assumed days between period starts
    #[serde(default = "default_cycle_length")]
    pub cycle_length_days: i64,
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(MIN_CYCLE_LENGTH_DAYS..=MAX_CYCLE_LENGTH_DAYS).contains(&self.cycle_length_days) {
            return Err(ValidationError::CycleLengthOutOfRange {
                value: self.cycle_length_days,
                min: MIN_CYCLE_LENGTH_DAYS,
                max: MAX_CYCLE_LENGTH_DAYS,
            });
        }
        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            cycle_length_days: default_cycle_length(),
        }
    }
}

fn default_cycle_length() -> i64 {
    DEFAULT_CYCLE_LENGTH_DAYS
}
