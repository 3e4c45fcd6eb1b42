//! Daily wellness challenge.
//!
//! The pick is a function of the calendar date, so every caller sees the
//! same challenge for the whole day without storing it anywhere.

use chrono::{Datelike, NaiveDate};

pub const CHALLENGES: &[&str] = &[
    "Take 10 deep breaths and relax.",
    "Write down 3 things you're grateful for.",
    "Stretch for 5 minutes.",
    "Drink a glass of water mindfully.",
    "Give yourself a 5-minute break and close your eyes.",
];

/// Returns the challenge for `date`.
pub fn daily_challenge(date: NaiveDate) -> &'static str {
    let index = date.num_days_from_ce().rem_euclid(CHALLENGES.len() as i32) as usize;
    CHALLENGES[index]
}
