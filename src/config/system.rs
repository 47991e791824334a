//! System configuration - root configuration structure.

use serde::Deserialize;

use super::channel::ChannelConfig;
use super::control::ControlConfig;
use super::stepper::StepperConfig;
use super::throttle::ThrottleConfig;

/// Root configuration structure from TOML.
///
/// Every section has engineering defaults, so `SystemConfig::default()` is a
/// complete boot-time configuration for the reference hardware.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SystemConfig {
    /// Throttle-to-drive mapping parameters.
    #[serde(default)]
    pub throttle: ThrottleConfig,

    /// Stepper actuator parameters.
    #[serde(default)]
    pub stepper: StepperConfig,

    /// Command/notify channel parameters.
    #[serde(default)]
    pub channel: ChannelConfig,

    /// Control loop cadence.
    #[serde(default)]
    pub control: ControlConfig,
}
