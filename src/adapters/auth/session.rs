//! Session-backed auth context.
//!
//! Holds whoever signed in on this device. The sign-in flow itself lives
//! outside this crate; it only reports the result here.

use std::sync::{PoisonError, RwLock};

use crate::domain::foundation::UserId;
use crate::ports::AuthContext;

/// Auth context that remembers the signed-in user.
#[derive(Debug, Default)]
pub struct SessionAuthContext {
    current: RwLock<Option<UserId>>,
}

impl SessionAuthContext {
    /// Creates a signed-out context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context already signed in as `user_id`.
    pub fn signed_in(user_id: UserId) -> Self {
        Self {
            current: RwLock::new(Some(user_id)),
        }
    }

    /// Records a successful sign-in.
    pub fn sign_in(&self, user_id: UserId) {
        tracing::debug!(user = %user_id, "signed in");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(user_id);
    }

    /// Forgets the current user.
    pub fn sign_out(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl AuthContext for SessionAuthContext {
    fn current_user_id(&self) -> Option<UserId> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
