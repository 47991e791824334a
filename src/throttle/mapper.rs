//! Throttle-to-drive mapping.
//!
//! Converts a raw analog throttle sample and the forward/reverse switch into
//! a normalized drive command. Samples below the dead-zone threshold produce
//! a shutdown command (zero magnitude); the remaining range maps inversely
//! onto `[0, drive_max]`. The inverted polarity encodes the physical sensor's
//! wiring convention and must be preserved.

use crate::config::{ThrottleConfig, MAX_ADC};

/// DC motor rotation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveDirection {
    /// Forward rotation (direction pin high).
    Forward,
    /// Backward rotation (direction pin low).
    Backward,
}

/// A normalized drive command: magnitude on the engineering 0-250 scale plus
/// a rotation direction.
///
/// Zero magnitude doubles as the shutdown/idle state: applying it deasserts
/// the motor driver's shutdown lines so no holding current flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveCommand {
    /// Drive magnitude in `[0, drive_max]`.
    pub magnitude: u8,
    /// Rotation direction.
    pub direction: DriveDirection,
}

impl DriveCommand {
    /// Whether this command puts the driver into the shutdown/idle state.
    #[inline]
    pub fn is_shutdown(&self) -> bool {
        self.magnitude == 0
    }
}

/// Pure throttle-to-drive mapper.
///
/// The switch input carries no debounce; a noisy switch can flip direction
/// between consecutive samples. This matches the reference hardware and is
/// an acknowledged risk, not something the mapper compensates for.
#[derive(Debug, Clone)]
pub struct ThrottleMapper {
    config: ThrottleConfig,
}

impl ThrottleMapper {
    /// Create a mapper from throttle configuration.
    pub fn new(config: ThrottleConfig) -> Self {
        Self { config }
    }

    /// Map a raw sample and switch state to a drive command.
    ///
    /// Below the dead zone the magnitude is 0 (shutdown). At or above it,
    /// `magnitude = (MAX_ADC - sample) * drive_max / (MAX_ADC - dead_zone)`,
    /// clamped to `[0, drive_max]` - monotonically non-increasing in the
    /// sample. Direction is taken verbatim from the switch (true = forward),
    /// optionally flipped by `invert_switch`.
    pub fn map(&self, sample: u16, switch_forward: bool) -> DriveCommand {
        let forward = switch_forward != self.config.invert_switch;
        let direction = if forward {
            DriveDirection::Forward
        } else {
            DriveDirection::Backward
        };

        let magnitude = if sample < self.config.dead_zone {
            0
        } else {
            let headroom = (MAX_ADC - sample) as u32;
            let scaled = headroom * self.config.drive_max as u32 / self.config.active_span();
            scaled.min(self.config.drive_max as u32) as u8
        };

        DriveCommand {
            magnitude,
            direction,
        }
    }

    /// The configured maximum drive magnitude.
    #[inline]
    pub fn drive_max(&self) -> u8 {
        self.config.drive_max
    }
}
