//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Current-user context
//! - `clock` - System and fixed clocks
//! - `storage` - In-memory and file-backed cycle log stores
//! - `postgres` - PostgreSQL cycle log store

pub mod auth;
pub mod clock;
pub mod postgres;
pub mod storage;

pub use auth::SessionAuthContext;
pub use clock::{FixedClock, SystemClock};
pub use postgres::PostgresCycleLogStore;
pub use storage::{FileCycleLogStore, InMemoryCycleLogStore};
