//! Sleep session duration from bedtime and wake-up clock times.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// One night of sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepSession {
    pub sleep_start: NaiveDateTime,
    pub sleep_end: NaiveDateTime,
}

impl SleepSession {
    /// Builds a session from "HH:MM" strings on `date`.
    ///
    /// A wake-up time at or before the bedtime is taken to be on the
    /// following day.
    pub fn from_clock_times(date: NaiveDate, start: &str, end: &str) -> Result<Self, ValidationError> {
        let start_time = parse_clock("sleep_start", start)?;
        let end_time = parse_clock("sleep_end", end)?;

        let sleep_start = date.and_time(start_time);
        let mut sleep_end = date.and_time(end_time);
        if sleep_end <= sleep_start {
            sleep_end += Duration::days(1);
        }

        Ok(Self { sleep_start, sleep_end })
    }

    pub fn duration(&self) -> Duration {
        self.sleep_end.signed_duration_since(self.sleep_start)
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration().num_minutes() as f64 / 60.0
    }
}

/// Mean duration in hours, or `None` for an empty slice.
pub fn average_hours(sessions: &[SleepSession]) -> Option<f64> {
    if sessions.is_empty() {
        return None;
    }
    let total: f64 = sessions.iter().map(SleepSession::duration_hours).sum();
    Some(total / sessions.len() as f64)
}

fn parse_clock(field: &str, raw: &str) -> Result<NaiveTime, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| ValidationError::invalid_format(field, format!("expected HH:MM, got '{}'", raw)))
}
