//! Cycle log store port.
//!
//! Defines the contract for persisting a user's cycle records.
//! Implementations handle the actual storage operations.
//!
//! # Design
//!
//! - **User-scoped**: every call names the owning user
//! - **Append-only**: records are never edited, only appended or removed
//! - **Unordered reads**: `list` returns storage order; callers sort

use async_trait::async_trait;

use crate::domain::cycle::{CycleRecord, NewCycleRecord};
use crate::domain::foundation::{CycleRecordId, DomainError, UserId};

/// Persistence port for cycle records.
#[async_trait]
pub trait CycleLogStore: Send + Sync {
    /// Persist a new record and return the identifier assigned to it.
    ///
    /// # Errors
    ///
    /// - `StoreUnavailable` / `DatabaseError` on persistence failure
    async fn append(&self, user_id: &UserId, record: &NewCycleRecord) -> Result<CycleRecordId, DomainError>;

    /// All records for a user in storage order.
    async fn list(&self, user_id: &UserId) -> Result<Vec<CycleRecord>, DomainError>;

    /// Delete one record.
    ///
    /// # Errors
    ///
    /// - `CycleRecordNotFound` if the user has no record with this id
    /// - `StoreUnavailable` / `DatabaseError` on persistence failure
    async fn remove(&self, user_id: &UserId, id: &CycleRecordId) -> Result<(), DomainError>;
}
