//! Configuration module for rig-control.
//!
//! Provides types for loading and validating the rig's tunables from TOML
//! files (with `std` feature) or from `Default` boot-time constants on
//! embedded targets. All engineering defaults match the reference hardware.

mod channel;
mod control;
#[cfg(feature = "std")]
mod loader;
mod stepper;
mod system;
mod throttle;
pub mod units;
mod validation;

pub use channel::{ChannelConfig, MAX_TAG_LEN};
pub use control::ControlConfig;
pub use stepper::StepperConfig;
pub use system::SystemConfig;
pub use throttle::{ThrottleConfig, MAX_ADC};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::Degrees;
