//! wellcycle - menstrual cycle tracking
//!
//! Logs periods as date ranges, predicts the next start from the most recent
//! period, and matches free-text symptoms to self-care tips. Storage, the
//! signed-in user and the clock are ports so the same controller runs against
//! PostgreSQL, a local file or memory.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
