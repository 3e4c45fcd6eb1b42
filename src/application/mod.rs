//! Application layer - use cases that coordinate domain logic and ports.

mod cycle_tracker;

pub use cycle_tracker::{
    CycleTrackerController, CycleTrackerError, DeleteCycleCommand, LogCycleCommand,
};
