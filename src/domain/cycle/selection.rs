//! Two-tap calendar selection: pick a start date, then an end date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, ValidationError};

/// Which tap the calendar expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    AwaitingStart,
    AwaitingEnd,
}

impl StateMachine for SelectionPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SelectionPhase::*;
        matches!((self, target), (AwaitingStart, AwaitingEnd) | (AwaitingEnd, AwaitingStart))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            SelectionPhase::AwaitingStart => vec![SelectionPhase::AwaitingEnd],
            SelectionPhase::AwaitingEnd => vec![SelectionPhase::AwaitingStart],
        }
    }
}

/// Current calendar selection.
///
/// After a completed pair the phase returns to `AwaitingStart` while the
/// chosen dates stay available for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSelection {
    phase: SelectionPhase,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl DateSelection {
    pub fn new() -> Self {
        Self {
            phase: SelectionPhase::AwaitingStart,
            start_date: None,
            end_date: None,
        }
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Both dates chosen.
    pub fn is_complete(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    /// Applies one calendar tap.
    ///
    /// In `AwaitingEnd`, a date before the chosen start is rejected and the
    /// selection is left untouched.
    pub fn select(&mut self, date: NaiveDate) -> Result<(), ValidationError> {
        match self.phase {
            SelectionPhase::AwaitingStart => {
                self.phase = self.phase.transition_to(SelectionPhase::AwaitingEnd)?;
                self.start_date = Some(date);
                self.end_date = None;
            }
            SelectionPhase::AwaitingEnd => {
                let start = self
                    .start_date
                    .ok_or_else(|| ValidationError::empty_field("start_date"))?;
                if date < start {
                    return Err(ValidationError::end_before_start(start, date));
                }
                self.phase = self.phase.transition_to(SelectionPhase::AwaitingStart)?;
                self.end_date = Some(date);
            }
        }
        Ok(())
    }

    /// Clears both dates and waits for a new start.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for DateSelection {
    fn default() -> Self {
        Self::new()
    }
}
