//! # rig-control
//!
//! Control logic for a small motorized rig: an analog throttle and a
//! forward/reverse switch drive a DC motor, a stepper actuator travels
//! between two soft position limits, and a wireless command/notify channel
//! lets a remote client operate and echo the rig.
//!
//! ## Features
//!
//! - **Configuration-driven**: All tunables (dead zone, limits, timing) in
//!   TOML files or boot-time defaults
//! - **embedded-hal 1.0**: Uses `OutputPin`/`InputPin` for GPIO,
//!   `SetDutyCycle` for the motor PWM, `DelayNs` for timing
//! - **no_std compatible**: Core library works without standard library
//! - **Dead-zone shutdown**: Zero throttle deasserts the motor driver's
//!   shutdown lines as part of one atomic drive update
//! - **Soft limits**: Stepper position is clamped to a closed interval;
//!   a limit hit is a normal outcome, never an error
//! - **Radio seam**: The peripheral radio stack sits behind a trait, so the
//!   channel logic is host-testable
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rig_control::{CommandChannel, ControlLoop, EchoOnly, SystemConfig};
//!
//! // Load configuration from TOML
//! let config: SystemConfig = rig_control::load_config("rig.toml")?;
//!
//! // Bring the radio up and start advertising
//! let channel = CommandChannel::start(radio, &config.channel, adv_payload)?;
//!
//! // Wire up hardware (embedded-hal pins, PWM channel, delay provider)
//! let mut rig = ControlLoop::new(
//!     &config, adc, switch, drive, stepper, channel, delay, EchoOnly,
//! );
//!
//! // Fixed-cadence control loop; only fatal HAL errors escape
//! rig.run()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `alloc`: Enables heap allocation for no_std with allocator
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod channel;
pub mod config;
pub mod control;
pub mod error;
pub mod stepper;
pub mod throttle;

// Re-exports for ergonomic API
pub use channel::{CommandChannel, PeerId, RadioEvent, RadioStack, ServiceHandles, ServiceSpec};
pub use config::{validate_config, ChannelConfig, StepperConfig, SystemConfig, ThrottleConfig};
pub use control::{CommandParser, ControlLoop, EchoOnly, RigCommand, ThrottleAdc};
pub use error::{Error, Result};
pub use stepper::{MoveOutcome, MoveRequest, PositionController, StepDirection};
pub use throttle::{DriveCommand, DriveDirection, DriveOutput, ThrottleMapper};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::load_config;

// Unit types
pub use config::units::Degrees;
