//! File-based Cycle Log Store Adapter
//!
//! Stores each user's cycle records as one YAML file on disk:
//! `<base>/<user>/cycles.yaml`. Suited to a single device's local storage.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::cycle::{CycleRecord, NewCycleRecord};
use crate::domain::foundation::{CycleRecordId, DomainError, ErrorCode, UserId};
use crate::ports::CycleLogStore;

/// File-based storage for cycle records
#[derive(Debug)]
pub struct FileCycleLogStore {
    base_path: PathBuf,
    // Serializes read-modify-write cycles on the YAML files.
    write_lock: Mutex<()>,
}

impl FileCycleLogStore {
    /// Create a new file store rooted at `base_path`.
    ///
    /// # Example
    /// ```ignore
    /// let store = FileCycleLogStore::new("./data/cycles");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Directory for one user.
    ///
    /// ASCII letters, digits and `-` pass through; every other byte,
    /// including `_`, becomes `_XX` (uppercase hex). The mapping is one-to-one
    /// and can never produce a path separator or `..`.
    fn user_dir(&self, user_id: &UserId) -> PathBuf {
        let mut safe = String::with_capacity(user_id.as_str().len());
        for byte in user_id.as_str().bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                safe.push(char::from(byte));
            } else {
                safe.push_str(&format!("_{:02X}", byte));
            }
        }
        self.base_path.join(safe)
    }

    fn log_file_path(&self, user_id: &UserId) -> PathBuf {
        self.user_dir(user_id).join("cycles.yaml")
    }

    async fn read_records(&self, user_id: &UserId) -> Result<Vec<CycleRecord>, DomainError> {
        let path = self.log_file_path(user_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let yaml = fs::read_to_string(&path).await.map_err(io_error)?;
        serde_yaml::from_str(&yaml).map_err(|e| {
            DomainError::new(
                ErrorCode::StoreUnavailable,
                format!("Failed to parse {}: {}", path.display(), e),
            )
        })
    }

    async fn write_records(&self, user_id: &UserId, records: &[CycleRecord]) -> Result<(), DomainError> {
        fs::create_dir_all(self.user_dir(user_id)).await.map_err(io_error)?;

        let yaml = serde_yaml::to_string(records).map_err(|e| {
            DomainError::new(ErrorCode::InternalError, format!("Failed to serialize records: {}", e))
        })?;
        fs::write(self.log_file_path(user_id), yaml).await.map_err(io_error)
    }
}

#[async_trait]
impl CycleLogStore for FileCycleLogStore {
    async fn append(&self, user_id: &UserId, record: &NewCycleRecord) -> Result<CycleRecordId, DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_records(user_id).await?;
        let id = CycleRecordId::new();
        records.push(record.clone().into_record(id));
        self.write_records(user_id, &records).await?;

        tracing::debug!(user = %user_id, record = %id, "appended cycle record to file");
        Ok(id)
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<CycleRecord>, DomainError> {
        self.read_records(user_id).await
    }

    async fn remove(&self, user_id: &UserId, id: &CycleRecordId) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.read_records(user_id).await?;
        let before = records.len();
        records.retain(|r| r.id() != *id);
        if records.len() == before {
            return Err(DomainError::new(
                ErrorCode::CycleRecordNotFound,
                format!("Cycle record not found: {}", id),
            ));
        }
        self.write_records(user_id, &records).await
    }
}

fn io_error(e: std::io::Error) -> DomainError {
    DomainError::new(ErrorCode::StoreUnavailable, format!("Cycle log I/O failed: {}", e))
}
