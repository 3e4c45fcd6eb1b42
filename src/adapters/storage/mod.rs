//! Storage Adapters
//!
//! Implementations of the CycleLogStore port that don't need a database.
//!
//! ## Available Adapters
//!
//! - **FileCycleLogStore** - Stores records as YAML files on disk
//! - **InMemoryCycleLogStore** - Stores records in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileCycleLogStore, InMemoryCycleLogStore};
//!
//! // On-device: file-based storage
//! let store = FileCycleLogStore::new("./data/cycles");
//!
//! // Testing: in-memory storage
//! let store = InMemoryCycleLogStore::new();
//! ```

mod file_cycle_log_store;
mod in_memory_cycle_log_store;

pub use file_cycle_log_store::FileCycleLogStore;
pub use in_memory_cycle_log_store::InMemoryCycleLogStore;
