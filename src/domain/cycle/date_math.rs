//! Calendar arithmetic used by the forecaster.
//!
//! All functions work on naive calendar components; no timezone
//! normalization happens here.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime};

/// Whole days from `from` to `to`, rounded toward positive infinity.
///
/// A partial day counts as a full day, so ten minutes after the reference
/// midnight is already day 1. Negative when `to` precedes `from`.
pub fn days_between(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    let elapsed = to.signed_duration_since(from);
    // num_days truncates toward zero, which is already the ceiling when negative.
    let truncated = elapsed.num_days();
    if elapsed > Duration::days(truncated) {
        truncated + 1
    } else {
        truncated
    }
}

/// Whole days from `from` to `to` for calendar dates.
pub fn days_between_dates(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Returns `date` shifted by `n` days, rolling month and year boundaries.
///
/// Saturates at the representable calendar range instead of panicking.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    let magnitude = Days::new(n.unsigned_abs());
    let shifted = if n >= 0 {
        date.checked_add_days(magnitude)
    } else {
        date.checked_sub_days(magnitude)
    };
    shifted.unwrap_or(if n >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}
