//! Cycle module - menstrual cycle logging and forecasting.
//!
//! Everything here is pure: date arithmetic, the forecaster, the symptom
//! advisor and the calendar selection state machine. Persistence and the
//! current user live behind ports.

pub mod advisor;
pub mod date_math;
mod forecast;
mod record;
mod selection;

pub use advisor::{advise, SymptomAdvisor, GENERIC_TIP};
pub use date_math::{add_days, days_between, days_between_dates};
pub use forecast::{forecast, sorted_newest_first, CycleForecast, ForecastState, DEFAULT_CYCLE_LENGTH_DAYS};
pub use record::{CycleRecord, NewCycleRecord};
pub use selection::{DateSelection, SelectionPhase};
