//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AuthContext` - The currently signed-in user
//! - `Clock` - Injectable current time
//! - `CycleLogStore` - Append/list/remove of cycle records

mod auth_context;
mod clock;
mod cycle_log_store;

pub use auth_context::AuthContext;
pub use clock::Clock;
pub use cycle_log_store::CycleLogStore;
