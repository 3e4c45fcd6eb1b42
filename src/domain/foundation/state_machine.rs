//! State machine trait for phase enums.
//!
//! Provides a consistent interface for validating and performing transitions
//! on small lifecycle enums such as the calendar date-selection phase.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define valid transitions and get a validated
/// `transition_to` for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for SelectionPhase {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!(
///             (self, target),
///             (AwaitingStart, AwaitingEnd) | (AwaitingEnd, AwaitingStart)
///         )
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             AwaitingStart => vec![AwaitingEnd],
///             AwaitingEnd => vec![AwaitingStart],
///         }
///     }
/// }
///
/// let next = phase.transition_to(SelectionPhase::AwaitingEnd)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
