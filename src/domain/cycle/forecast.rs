//! Cycle forecasting - next predicted start date and progress.
//!
//! The forecast is a pure function of the logged history, the current time,
//! and the cycle length. It is never persisted; callers recompute it after
//! every change to the history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date_math::{add_days, days_between, days_between_dates};
use super::record::CycleRecord;
use crate::domain::foundation::{Percentage, Timestamp};

/// Cycle length used when none is configured.
pub const DEFAULT_CYCLE_LENGTH_DAYS: i64 = 28;

/// Derived forecast state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastState {
    /// Nothing logged yet; the UI should prompt for a first cycle.
    NoData,
    /// A prediction anchored on the most recent record.
    Predicted(CycleForecast),
}

impl ForecastState {
    /// Returns the prediction, if any.
    pub fn prediction(&self) -> Option<&CycleForecast> {
        match self {
            ForecastState::NoData => None,
            ForecastState::Predicted(forecast) => Some(forecast),
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, ForecastState::NoData)
    }
}

/// Prediction for the upcoming cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleForecast {
    /// End date (or start date) of the most recent record.
    pub reference_date: NaiveDate,
    /// `reference_date + cycle_length_days`.
    pub next_predicted_start: NaiveDate,
    /// How far into the predicted cycle "now" is.
    pub progress: Percentage,
    /// Presentation hint: progress reached 100%.
    pub overdue: bool,
    /// Calendar days from today until `next_predicted_start`; negative once past.
    pub days_until_next: i64,
    /// Cycle length the prediction was computed with.
    pub cycle_length_days: i64,
}

/// Computes the forecast for `history` at `now`.
///
/// History may arrive in any order; records are sorted by start date
/// (newest first, ties broken by `logged_at`) before picking the anchor.
/// A non-positive `cycle_length_days` falls back to the default length.
pub fn forecast(history: &[CycleRecord], now: Timestamp, cycle_length_days: i64) -> ForecastState {
    let cycle_length_days = if cycle_length_days > 0 {
        cycle_length_days
    } else {
        DEFAULT_CYCLE_LENGTH_DAYS
    };

    let Some(latest) = most_recent(history) else {
        return ForecastState::NoData;
    };

    let reference_date = latest.reference_date();
    let next_predicted_start = add_days(reference_date, cycle_length_days);
    let elapsed = days_between(Timestamp::start_of(reference_date).naive(), now.naive());
    let progress = Percentage::from_ratio(elapsed, cycle_length_days);

    ForecastState::Predicted(CycleForecast {
        reference_date,
        next_predicted_start,
        progress,
        overdue: progress.is_complete(),
        days_until_next: days_between_dates(now.date(), next_predicted_start),
        cycle_length_days,
    })
}

/// Returns `history` ordered by start date descending.
pub fn sorted_newest_first(history: &[CycleRecord]) -> Vec<CycleRecord> {
    let mut sorted = history.to_vec();
    sorted.sort_by(|a, b| {
        b.start_date()
            .cmp(&a.start_date())
            .then_with(|| b.logged_at().cmp(&a.logged_at()))
    });
    sorted
}

fn most_recent(history: &[CycleRecord]) -> Option<&CycleRecord> {
    history.iter().max_by(|a, b| {
        a.start_date()
            .cmp(&b.start_date())
            .then_with(|| a.logged_at().cmp(&b.logged_at()))
    })
}
