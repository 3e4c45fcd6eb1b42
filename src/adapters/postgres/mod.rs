//! PostgreSQL adapters - Database implementations for store ports.
//!
//! - `PostgresCycleLogStore` - Cycle records in the `cycle_records` table

mod cycle_log_store;

pub use cycle_log_store::PostgresCycleLogStore;
