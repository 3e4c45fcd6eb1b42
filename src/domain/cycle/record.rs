//! Cycle records - one logged menstrual period.
//!
//! A record is created from a validated [`NewCycleRecord`] draft and is
//! immutable afterwards; the only lifecycle operation is deletion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CycleRecordId, Timestamp, ValidationError};

/// A validated, not-yet-persisted cycle record.
///
/// Construction enforces `end_date >= start_date`, so a log store never
/// receives an inconsistent range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCycleRecord {
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    symptoms: Option<String>,
    logged_at: Timestamp,
}

impl NewCycleRecord {
    /// Creates a draft, rejecting an end date before the start date.
    ///
    /// Blank symptom text is stored as absent.
    pub fn new(
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        symptoms: Option<String>,
        logged_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        if let Some(end) = end_date {
            if end < start_date {
                return Err(ValidationError::end_before_start(start_date, end));
            }
        }

        Ok(Self {
            start_date,
            end_date,
            symptoms: normalize_symptoms(symptoms),
            logged_at,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn symptoms(&self) -> Option<&str> {
        self.symptoms.as_deref()
    }

    pub fn logged_at(&self) -> Timestamp {
        self.logged_at
    }

    /// Attaches the store-assigned identifier, producing the stored record.
    pub fn into_record(self, id: CycleRecordId) -> CycleRecord {
        CycleRecord {
            id,
            start_date: self.start_date,
            end_date: self.end_date,
            symptoms: self.symptoms,
            logged_at: self.logged_at,
        }
    }
}

/// A persisted cycle record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRecord {
    id: CycleRecordId,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    symptoms: Option<String>,
    logged_at: Timestamp,
}

impl CycleRecord {
    /// Reconstitutes a record read back from storage.
    ///
    /// Applies the same range check as [`NewCycleRecord::new`] so corrupt
    /// rows surface as errors instead of skewing the forecast.
    pub fn reconstitute(
        id: CycleRecordId,
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        symptoms: Option<String>,
        logged_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        Ok(NewCycleRecord::new(start_date, end_date, symptoms, logged_at)?.into_record(id))
    }

    pub fn id(&self) -> CycleRecordId {
        self.id
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn symptoms(&self) -> Option<&str> {
        self.symptoms.as_deref()
    }

    pub fn logged_at(&self) -> Timestamp {
        self.logged_at
    }

    /// True while no end date has been logged.
    pub fn is_open(&self) -> bool {
        self.end_date.is_none()
    }

    /// The anchor for forecasting: end date when known, otherwise start date.
    pub fn reference_date(&self) -> NaiveDate {
        self.end_date.unwrap_or(self.start_date)
    }

    /// Period length in days, counting both ends. `None` while open.
    pub fn duration_days(&self) -> Option<i64> {
        self.end_date
            .map(|end| end.signed_duration_since(self.start_date).num_days() + 1)
    }
}

fn normalize_symptoms(symptoms: Option<String>) -> Option<String> {
    symptoms
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
