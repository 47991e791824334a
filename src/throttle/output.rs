//! Atomic drive output.
//!
//! Applies a [`DriveCommand`] to the motor driver hardware as one operation:
//! direction pin, both shutdown lines, and PWM duty are never left in a
//! half-applied state relative to each other.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::error::{DriveError, Result};

use super::mapper::{DriveCommand, DriveDirection};

/// DC motor drive output.
///
/// Generic over:
/// - `DIR`: direction pin (high = forward, low = backward)
/// - `SD1`, `SD2`: driver shutdown/enable lines (low = shutdown)
/// - `PWM`: duty-cycle channel on the engineering 0-250 scale
pub struct DriveOutput<DIR, SD1, SD2, PWM>
where
    DIR: OutputPin,
    SD1: OutputPin,
    SD2: OutputPin,
    PWM: SetDutyCycle,
{
    dir_pin: DIR,
    sd1_pin: SD1,
    sd2_pin: SD2,
    pwm: PWM,

    /// Full-scale denominator for duty normalization.
    drive_max: u8,

    /// Last applied command (avoids redundant pin writes on the direction
    /// line, which matters at the shutdown boundary with a noisy switch).
    last: Option<DriveCommand>,
}

impl<DIR, SD1, SD2, PWM> DriveOutput<DIR, SD1, SD2, PWM>
where
    DIR: OutputPin,
    SD1: OutputPin,
    SD2: OutputPin,
    PWM: SetDutyCycle,
{
    /// Create a new drive output.
    pub fn new(dir_pin: DIR, sd1_pin: SD1, sd2_pin: SD2, pwm: PWM, drive_max: u8) -> Self {
        Self {
            dir_pin,
            sd1_pin,
            sd2_pin,
            pwm,
            drive_max: drive_max.max(1),
            last: None,
        }
    }

    /// Power-on state: both shutdown lines asserted, ready to drive.
    pub fn init(&mut self) -> Result<()> {
        self.sd1_pin.set_high().map_err(|_| DriveError::Pin)?;
        self.sd2_pin.set_high().map_err(|_| DriveError::Pin)?;
        Ok(())
    }

    /// Apply a drive command as one atomic update.
    ///
    /// Zero magnitude deasserts both shutdown lines and zeroes the duty;
    /// nonzero magnitude asserts them and sets
    /// `duty = magnitude / drive_max` of full scale.
    pub fn apply(&mut self, cmd: DriveCommand) -> Result<()> {
        if self.last == Some(cmd) {
            return Ok(());
        }

        match cmd.direction {
            DriveDirection::Forward => self.dir_pin.set_high().map_err(|_| DriveError::Pin)?,
            DriveDirection::Backward => self.dir_pin.set_low().map_err(|_| DriveError::Pin)?,
        }

        if cmd.is_shutdown() {
            self.pwm
                .set_duty_cycle_fully_off()
                .map_err(|_| DriveError::Pwm)?;
            self.sd1_pin.set_low().map_err(|_| DriveError::Pin)?;
            self.sd2_pin.set_low().map_err(|_| DriveError::Pin)?;
            #[cfg(feature = "defmt")]
            if self.last.map(|c| !c.is_shutdown()).unwrap_or(false) {
                defmt::debug!("drive: shutdown");
            }
        } else {
            self.sd1_pin.set_high().map_err(|_| DriveError::Pin)?;
            self.sd2_pin.set_high().map_err(|_| DriveError::Pin)?;
            self.pwm
                .set_duty_cycle_fraction(cmd.magnitude as u16, self.drive_max as u16)
                .map_err(|_| DriveError::Pwm)?;
        }

        self.last = Some(cmd);
        Ok(())
    }

    /// The last command applied, if any.
    #[inline]
    pub fn last_command(&self) -> Option<DriveCommand> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::pwm::ErrorType;

    #[derive(Default)]
    struct TestPin {
        state: bool,
        writes: usize,
    }

    impl embedded_hal::digital::ErrorType for TestPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for TestPin {
        fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
            self.state = true;
            self.writes += 1;
            Ok(())
        }

        fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
            self.state = false;
            self.writes += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct TestPwm {
        duty: u16,
    }

    impl ErrorType for TestPwm {
        type Error = core::convert::Infallible;
    }

    impl SetDutyCycle for TestPwm {
        fn max_duty_cycle(&self) -> u16 {
            u16::MAX
        }

        fn set_duty_cycle(&mut self, duty: u16) -> core::result::Result<(), Self::Error> {
            self.duty = duty;
            Ok(())
        }
    }

    fn output() -> DriveOutput<TestPin, TestPin, TestPin, TestPwm> {
        DriveOutput::new(
            TestPin::default(),
            TestPin::default(),
            TestPin::default(),
            TestPwm::default(),
            250,
        )
    }

    #[test]
    fn test_shutdown_deasserts_lines() {
        let mut out = output();
        out.init().unwrap();
        out.apply(DriveCommand {
            magnitude: 0,
            direction: DriveDirection::Forward,
        })
        .unwrap();

        assert!(!out.sd1_pin.state);
        assert!(!out.sd2_pin.state);
        assert_eq!(out.pwm.duty, 0);
        assert!(out.dir_pin.state);
    }

    #[test]
    fn test_nonzero_asserts_lines_and_scales_duty() {
        let mut out = output();
        out.apply(DriveCommand {
            magnitude: 125,
            direction: DriveDirection::Backward,
        })
        .unwrap();

        assert!(out.sd1_pin.state);
        assert!(out.sd2_pin.state);
        assert!(!out.dir_pin.state);
        // 125/250 of a 16-bit full scale
        let expected = (u16::MAX as u32 * 125 / 250) as u16;
        assert!((out.pwm.duty as i32 - expected as i32).abs() <= 1);
    }

    #[test]
    fn test_full_drive_is_full_duty() {
        let mut out = output();
        out.apply(DriveCommand {
            magnitude: 250,
            direction: DriveDirection::Forward,
        })
        .unwrap();
        assert_eq!(out.pwm.duty, u16::MAX);
    }

    #[test]
    fn test_repeated_command_skips_pin_writes() {
        let mut out = output();
        let cmd = DriveCommand {
            magnitude: 80,
            direction: DriveDirection::Forward,
        };
        out.apply(cmd).unwrap();
        let writes = out.dir_pin.writes;
        out.apply(cmd).unwrap();
        assert_eq!(out.dir_pin.writes, writes);
    }
}
