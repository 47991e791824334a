//! Stepper actuator configuration.

use serde::Deserialize;

use super::units::Degrees;

/// Stepper actuator parameters: soft limits, calibration, and pulse timing.
///
/// Position is tracked open-loop in logical units within
/// `[left_limit, right_limit]`; the physical pulse count for one move is
/// derived from the requested angle and `degrees_per_pulse`.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperConfig {
    /// Left soft limit (minimum logical position).
    #[serde(default = "default_left_limit")]
    pub left_limit: i32,

    /// Right soft limit (maximum logical position).
    #[serde(default = "default_right_limit")]
    pub right_limit: i32,

    /// Output degrees of travel per step pulse. Single calibration constant
    /// folding gear ratio and the observed mechanism correction (reference
    /// hardware: 0.036 deg/step under 1:50 gearing, halved by a x2 pulse
    /// correction).
    #[serde(default = "default_degrees_per_pulse")]
    pub degrees_per_pulse: f32,

    /// Half period of one step pulse in microseconds (high hold == low hold).
    #[serde(default = "default_pulse_half_period_us")]
    pub pulse_half_period_us: u32,

    /// Default travel per move command in degrees.
    #[serde(default = "default_move_degrees")]
    pub default_move_degrees: Degrees,
}

fn default_left_limit() -> i32 {
    0
}

fn default_right_limit() -> i32 {
    20
}

fn default_degrees_per_pulse() -> f32 {
    0.018
}

fn default_pulse_half_period_us() -> u32 {
    500
}

fn default_move_degrees() -> Degrees {
    Degrees(30.0)
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            left_limit: default_left_limit(),
            right_limit: default_right_limit(),
            degrees_per_pulse: default_degrees_per_pulse(),
            pulse_half_period_us: default_pulse_half_period_us(),
            default_move_degrees: default_move_degrees(),
        }
    }
}

impl StepperConfig {
    /// Midpoint of the travel range; the startup position.
    #[inline]
    pub fn mid_position(&self) -> i32 {
        (self.left_limit + self.right_limit) / 2
    }

    /// Check if a logical position is within the soft limits.
    #[inline]
    pub fn contains(&self, position: i32) -> bool {
        position >= self.left_limit && position <= self.right_limit
    }
}
