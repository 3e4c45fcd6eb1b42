//! Auth context port - who is signed in right now.
//!
//! The tracker never authenticates anyone itself. It asks this port for the
//! current user and refuses to touch the log store when there is none.

use crate::domain::foundation::UserId;

/// Supplies the identity of the signed-in user.
///
/// # Contract
///
/// - Return `Some(user_id)` while a user is signed in
/// - Return `None` otherwise; callers treat this as "unauthenticated"
pub trait AuthContext: Send + Sync {
    fn current_user_id(&self) -> Option<UserId>;
}
