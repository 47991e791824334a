//! Throttle module for rig-control.
//!
//! Provides the throttle-to-drive mapper and the atomic drive output that
//! applies a command to the motor driver hardware.

mod mapper;
mod output;

pub use mapper::{DriveCommand, DriveDirection, ThrottleMapper};
pub use output::DriveOutput;
