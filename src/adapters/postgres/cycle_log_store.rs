//! PostgreSQL implementation of CycleLogStore.
//!
//! Persists cycle records to the `cycle_records` table, one row per record.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::domain::cycle::{CycleRecord, NewCycleRecord};
use crate::domain::foundation::{CycleRecordId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::CycleLogStore;

/// PostgreSQL implementation of CycleLogStore.
#[derive(Clone)]
pub struct PostgresCycleLogStore {
    pool: PgPool,
}

impl PostgresCycleLogStore {
    /// Creates a new PostgresCycleLogStore.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool from configuration and optionally runs migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DomainError> {
        let url = config.url.as_deref().ok_or_else(|| {
            DomainError::new(ErrorCode::InternalError, "Database URL is not configured")
        })?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(url)
            .await
            .map_err(|e| DomainError::new(ErrorCode::StoreUnavailable, format!("Failed to connect: {}", e)))?;

        if config.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Migration failed: {}", e)))?;
        }

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl CycleLogStore for PostgresCycleLogStore {
    async fn append(&self, user_id: &UserId, record: &NewCycleRecord) -> Result<CycleRecordId, DomainError> {
        let id = CycleRecordId::new();

        sqlx::query(
            r#"
            INSERT INTO cycle_records (
                id, user_id, start_date, end_date, symptoms, logged_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_str())
        .bind(record.start_date())
        .bind(record.end_date())
        .bind(record.symptoms())
        .bind(*record.logged_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to insert cycle record: {}", e)))?;

        tracing::debug!(user = %user_id, record = %id, "inserted cycle record");
        Ok(id)
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<CycleRecord>, DomainError> {
        // Storage order; the forecaster sorts on its own.
        let rows = sqlx::query(
            r#"
            SELECT id, start_date, end_date, symptoms, logged_at
            FROM cycle_records
            WHERE user_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to fetch cycle records: {}", e)))?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn remove(&self, user_id: &UserId, id: &CycleRecordId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM cycle_records WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Failed to delete cycle record: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::CycleRecordNotFound,
                format!("Cycle record not found: {}", id),
            ));
        }

        Ok(())
    }
}

fn row_to_record(row: PgRow) -> Result<CycleRecord, DomainError> {
    let id: Uuid = row.get("id");
    let start_date: NaiveDate = row.get("start_date");
    let end_date: Option<NaiveDate> = row.get("end_date");
    let symptoms: Option<String> = row.get("symptoms");
    let logged_at: DateTime<Utc> = row.get("logged_at");

    CycleRecord::reconstitute(
        CycleRecordId::from_uuid(id),
        start_date,
        end_date,
        symptoms,
        Timestamp::from_datetime(logged_at),
    )
    .map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Corrupt cycle record {}: {}", id, e))
    })
}
