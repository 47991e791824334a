//! Control loop for rig-control.
//!
//! The top-level orchestrator: samples the throttle and switch, applies the
//! mapped drive command, drains inbound channel commands, and sleeps the
//! fixed inter-tick delay.

mod command;
mod hal;
mod runner;

pub use command::{CommandParser, EchoOnly, RigCommand};
pub use hal::{DriveActuator, StepperActuator, ThrottleAdc};
pub use runner::ControlLoop;
