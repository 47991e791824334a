//! Stepper module for rig-control.
//!
//! Provides the leaf pulse driver and the bounded position controller that
//! moves the actuator between two soft limits.

mod controller;
mod pulse;

pub use controller::{MoveOutcome, MoveRequest, PositionController, StepDirection};
pub use pulse::StepPulse;
