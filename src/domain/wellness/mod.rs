//! Wellness calculators - BMI, sleep duration, daily challenge.

mod bmi;
mod challenge;
mod sleep;

pub use bmi::{BmiCategory, BmiReading};
pub use challenge::{daily_challenge, CHALLENGES};
pub use sleep::{average_hours, SleepSession};
