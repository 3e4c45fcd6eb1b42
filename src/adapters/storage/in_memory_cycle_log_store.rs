//! In-Memory Cycle Log Store Adapter
//!
//! Keeps cycle records in memory, per user, in insertion order.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::cycle::{CycleRecord, NewCycleRecord};
use crate::domain::foundation::{CycleRecordId, DomainError, ErrorCode, UserId};
use crate::ports::CycleLogStore;

/// In-memory storage for cycle records
#[derive(Debug, Clone, Default)]
pub struct InMemoryCycleLogStore {
    records: Arc<RwLock<HashMap<UserId, Vec<CycleRecord>>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryCycleLogStore {
    /// Create a new in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate an outage: every call fails with `StoreUnavailable` while set.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of records stored for a user
    pub async fn record_count(&self, user_id: &UserId) -> usize {
        self.records
            .read()
            .await
            .get(user_id)
            .map(Vec::len)
            .unwrap_or(0)
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::StoreUnavailable,
                "In-memory store marked unavailable",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CycleLogStore for InMemoryCycleLogStore {
    async fn append(&self, user_id: &UserId, record: &NewCycleRecord) -> Result<CycleRecordId, DomainError> {
        self.check_available()?;

        let id = CycleRecordId::new();
        self.records
            .write()
            .await
            .entry(user_id.clone())
            .or_default()
            .push(record.clone().into_record(id));
        Ok(id)
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<CycleRecord>, DomainError> {
        self.check_available()?;

        Ok(self
            .records
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn remove(&self, user_id: &UserId, id: &CycleRecordId) -> Result<(), DomainError> {
        self.check_available()?;

        let mut records = self.records.write().await;
        let user_records = records.get_mut(user_id);
        let position = user_records
            .as_ref()
            .and_then(|list| list.iter().position(|r| r.id() == *id));

        match (user_records, position) {
            (Some(list), Some(pos)) => {
                list.remove(pos);
                Ok(())
            }
            _ => Err(DomainError::new(
                ErrorCode::CycleRecordNotFound,
                format!("Cycle record not found: {}", id),
            )),
        }
    }
}
