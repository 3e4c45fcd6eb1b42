//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `cycle` - Cycle records, forecasting, symptom advice, date selection
//! - `wellness` - BMI, sleep duration and daily challenge calculators

pub mod cycle;
pub mod foundation;
pub mod wellness;
