//! Throttle mapping configuration.

use serde::Deserialize;

/// Full scale of the throttle ADC (16-bit).
pub const MAX_ADC: u16 = u16::MAX;

/// Throttle-to-drive mapping parameters.
///
/// Samples below `dead_zone` shut the motor driver down; the remaining range
/// maps inversely onto `[0, drive_max]` (larger raw sample means smaller
/// drive - the sensor is wired with an inverted curve).
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThrottleConfig {
    /// Dead-zone threshold in raw ADC counts. Samples below this produce
    /// zero magnitude and deassert the driver's shutdown lines.
    #[serde(default = "default_dead_zone")]
    pub dead_zone: u16,

    /// Maximum drive magnitude on the engineering 0-250 scale.
    #[serde(default = "default_drive_max")]
    pub drive_max: u8,

    /// Invert the forward/reverse switch polarity.
    #[serde(default)]
    pub invert_switch: bool,
}

fn default_dead_zone() -> u16 {
    18000
}

fn default_drive_max() -> u8 {
    250
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            dead_zone: default_dead_zone(),
            drive_max: default_drive_max(),
            invert_switch: false,
        }
    }
}

impl ThrottleConfig {
    /// Width of the active (non-dead-zone) portion of the sample range.
    ///
    /// Never zero, even for an unvalidated `dead_zone` at full scale: the
    /// span is the mapper's divisor and the mapper has no error path.
    #[inline]
    pub fn active_span(&self) -> u32 {
        ((MAX_ADC - self.dead_zone) as u32).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ThrottleConfig::default();
        assert_eq!(config.dead_zone, 18000);
        assert_eq!(config.drive_max, 250);
        assert!(!config.invert_switch);
        assert_eq!(config.active_span(), 47535);
    }

    #[test]
    fn test_active_span_is_never_zero() {
        let config = ThrottleConfig {
            dead_zone: MAX_ADC,
            ..ThrottleConfig::default()
        };
        assert_eq!(config.active_span(), 1);
    }
}
