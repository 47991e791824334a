//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::throttle::MAX_ADC;
use super::SystemConfig;

/// Validate a system configuration.
///
/// Checks:
/// - Dead zone sits below the ADC full scale
/// - Drive maximum is nonzero
/// - Soft limits are ordered (left < right)
/// - Calibration and timing constants are positive
/// - Tick period is within the 10-1000 ms cadence range
/// - Device name fits the 8-byte advertising budget
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    validate_throttle(config)?;
    validate_stepper(config)?;
    validate_channel(config)?;
    validate_control(config)?;
    Ok(())
}

fn validate_throttle(config: &SystemConfig) -> Result<()> {
    let throttle = &config.throttle;

    if throttle.dead_zone >= MAX_ADC {
        return Err(Error::Config(ConfigError::InvalidDeadZone(throttle.dead_zone)));
    }

    if throttle.drive_max == 0 {
        return Err(Error::Config(ConfigError::InvalidDriveMax(throttle.drive_max)));
    }

    Ok(())
}

fn validate_stepper(config: &SystemConfig) -> Result<()> {
    let stepper = &config.stepper;

    if stepper.left_limit >= stepper.right_limit {
        return Err(Error::Config(ConfigError::InvalidSoftLimits {
            left: stepper.left_limit,
            right: stepper.right_limit,
        }));
    }

    if stepper.degrees_per_pulse <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidDegreesPerPulse(
            stepper.degrees_per_pulse,
        )));
    }

    if stepper.pulse_half_period_us == 0 {
        return Err(Error::Config(ConfigError::InvalidPulseHalfPeriod(
            stepper.pulse_half_period_us,
        )));
    }

    Ok(())
}

fn validate_channel(config: &SystemConfig) -> Result<()> {
    let channel = &config.channel;

    if channel.device_name.is_empty() || channel.device_name.len() > 8 {
        return Err(Error::Config(ConfigError::InvalidDeviceName(
            channel.device_name.clone(),
        )));
    }

    if channel.adv_interval_us == 0 {
        return Err(Error::Config(ConfigError::InvalidAdvInterval(
            channel.adv_interval_us,
        )));
    }

    Ok(())
}

fn validate_control(config: &SystemConfig) -> Result<()> {
    let tick = config.control.tick_ms;
    if !(10..=1000).contains(&tick) {
        return Err(Error::Config(ConfigError::InvalidTickPeriod(tick)));
    }
    Ok(())
}
