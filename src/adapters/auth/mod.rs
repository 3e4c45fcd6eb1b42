//! Authentication adapters.
//!
//! Implementations of the `AuthContext` port:
//!
//! - `session` - In-process record of the signed-in user

mod session;

pub use session::SessionAuthContext;
