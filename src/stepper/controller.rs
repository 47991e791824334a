//! Stepper position controller.
//!
//! A bounded integer position state machine over embedded-hal pins. Position
//! lives in the closed interval `[left_limit, right_limit]`, moves one
//! logical unit per accepted move, and is tracked strictly open-loop: the
//! counter can desynchronize from the physical shaft under stall or slip,
//! and there is no homing or recovery path.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use libm::roundf;

use crate::config::{Degrees, StepperConfig};
use crate::error::{Result, StepperError};

use super::pulse::StepPulse;

/// Direction of actuator travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepDirection {
    /// Toward the left limit (direction pin low).
    Left,
    /// Toward the right limit (direction pin high).
    Right,
}

/// A single move request.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveRequest {
    /// Direction of travel.
    pub direction: StepDirection,
    /// Angle of travel in degrees (positive).
    pub degrees: Degrees,
}

impl MoveRequest {
    /// Convenience constructor.
    #[inline]
    pub const fn new(direction: StepDirection, degrees: Degrees) -> Self {
        Self { direction, degrees }
    }
}

/// Outcome of a move: the new logical position, the number of physical
/// pulses emitted, and whether the soft limit stopped the move.
///
/// A limit hit is a normal terminal outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoveOutcome {
    /// Logical position after the move.
    pub position: i32,
    /// Physical step pulses emitted (0 when at the limit).
    pub pulses_emitted: u32,
    /// True when the requested direction was already at its soft limit.
    pub at_limit: bool,
}

/// Bounded stepper position controller.
///
/// Generic over:
/// - `EN`: driver enable pin (high = enabled)
/// - `RST`: driver reset pin (low pulse at power-on)
/// - `DIR`: direction pin (low = left, high = right)
/// - `PUL`: step pulse pin
/// - `DELAY`: delay provider for pulse timing
///
/// [`Self::move_to`] blocks for the whole pulse train and takes `&mut self`,
/// so two trains can never overlap for the same actuator. If platform glue
/// can preempt the owning context, it must serialize access externally.
pub struct PositionController<EN, RST, DIR, PUL, DELAY>
where
    EN: OutputPin,
    RST: OutputPin,
    DIR: OutputPin,
    PUL: OutputPin,
    DELAY: DelayNs,
{
    en_pin: EN,
    rst_pin: RST,
    dir_pin: DIR,
    pul_pin: PUL,
    delay: DELAY,

    pulse: StepPulse,
    config: StepperConfig,

    /// Logical position, always within `[left_limit, right_limit]`.
    position: i32,

    /// Cached direction pin state to avoid redundant writes.
    current_direction: Option<StepDirection>,
}

impl<EN, RST, DIR, PUL, DELAY> PositionController<EN, RST, DIR, PUL, DELAY>
where
    EN: OutputPin,
    RST: OutputPin,
    DIR: OutputPin,
    PUL: OutputPin,
    DELAY: DelayNs,
{
    /// Create a controller at the mid position with the driver disabled.
    pub fn new(
        en_pin: EN,
        rst_pin: RST,
        dir_pin: DIR,
        pul_pin: PUL,
        delay: DELAY,
        config: StepperConfig,
    ) -> Self {
        let position = config.mid_position();
        let pulse = StepPulse::new(config.pulse_half_period_us);
        Self {
            en_pin,
            rst_pin,
            dir_pin,
            pul_pin,
            delay,
            pulse,
            config,
            position,
            current_direction: None,
        }
    }

    /// Power-on reset sequence: driver disabled, RST held low 10 ms, then
    /// released.
    pub fn reset(&mut self) -> Result<()> {
        self.en_pin.set_low().map_err(|_| StepperError::Pin)?;
        self.rst_pin.set_low().map_err(|_| StepperError::Pin)?;
        self.delay.delay_ms(10);
        self.rst_pin.set_high().map_err(|_| StepperError::Pin)?;
        Ok(())
    }

    /// Current logical position.
    #[inline]
    pub fn position(&self) -> i32 {
        self.position
    }

    /// The stepper configuration.
    #[inline]
    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    /// Physical pulses for a given angle: `round(degrees / degrees_per_pulse)`.
    pub fn pulses_for(&self, degrees: Degrees) -> u32 {
        let pulses = roundf(degrees.0 / self.config.degrees_per_pulse);
        if pulses <= 0.0 {
            0
        } else {
            pulses as u32
        }
    }

    /// Execute a move request.
    ///
    /// If the requested direction is already at its soft limit, the position
    /// is clamped to the limit and no pulses are emitted - a normal terminal
    /// outcome. Otherwise the logical position moves one unit, the driver is
    /// enabled, the pulse train runs to completion (blocking,
    /// uninterruptible), and the driver is disabled again.
    ///
    /// # Errors
    ///
    /// Only pin failures are errors; they are fatal and leave the driver in
    /// an undefined enable state.
    pub fn move_to(&mut self, request: MoveRequest) -> Result<MoveOutcome> {
        match request.direction {
            StepDirection::Left => {
                if self.position <= self.config.left_limit {
                    self.position = self.config.left_limit;
                    return Ok(self.at_limit_outcome());
                }
                self.set_direction(StepDirection::Left)?;
                self.position -= 1;
            }
            StepDirection::Right => {
                if self.position >= self.config.right_limit {
                    self.position = self.config.right_limit;
                    return Ok(self.at_limit_outcome());
                }
                self.set_direction(StepDirection::Right)?;
                self.position += 1;
            }
        }

        let pulses = self.pulses_for(request.degrees);

        self.en_pin.set_high().map_err(|_| StepperError::Pin)?;
        for _ in 0..pulses {
            self.pulse.emit(&mut self.pul_pin, &mut self.delay)?;
        }
        self.en_pin.set_low().map_err(|_| StepperError::Pin)?;

        let outcome = MoveOutcome {
            position: self.position,
            pulses_emitted: pulses,
            at_limit: false,
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("stepper: moved to {}", outcome.position);

        Ok(outcome)
    }

    /// Execute one move of the configured default angle in `direction`.
    pub fn nudge(&mut self, direction: StepDirection) -> Result<MoveOutcome> {
        let degrees = self.config.default_move_degrees;
        self.move_to(MoveRequest::new(direction, degrees))
    }

    fn at_limit_outcome(&self) -> MoveOutcome {
        #[cfg(feature = "defmt")]
        defmt::debug!("stepper: at limit {}", self.position);
        MoveOutcome {
            position: self.position,
            pulses_emitted: 0,
            at_limit: true,
        }
    }

    fn set_direction(&mut self, direction: StepDirection) -> Result<()> {
        if self.current_direction == Some(direction) {
            return Ok(());
        }

        match direction {
            StepDirection::Left => self.dir_pin.set_low().map_err(|_| StepperError::Pin)?,
            StepDirection::Right => self.dir_pin.set_high().map_err(|_| StepperError::Pin)?,
        }

        self.current_direction = Some(direction);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StepperConfig;

    /// Counting pin that records level changes.
    #[derive(Default)]
    struct CountingPin {
        state: bool,
        rising_edges: u32,
    }

    impl embedded_hal::digital::ErrorType for CountingPin {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for CountingPin {
        fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
            if !self.state {
                self.rising_edges += 1;
            }
            self.state = true;
            Ok(())
        }

        fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
            self.state = false;
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    type TestController = PositionController<CountingPin, CountingPin, CountingPin, CountingPin, NoDelay>;

    fn controller() -> TestController {
        PositionController::new(
            CountingPin::default(),
            CountingPin::default(),
            CountingPin::default(),
            CountingPin::default(),
            NoDelay,
            StepperConfig::default(),
        )
    }

    fn left(degrees: f32) -> MoveRequest {
        MoveRequest::new(StepDirection::Left, Degrees(degrees))
    }

    fn right(degrees: f32) -> MoveRequest {
        MoveRequest::new(StepDirection::Right, Degrees(degrees))
    }

    #[test]
    fn test_starts_at_mid() {
        let c = controller();
        assert_eq!(c.position(), 10);
    }

    #[test]
    fn test_single_left_move() {
        let mut c = controller();
        let outcome = c.move_to(left(36.0)).unwrap();

        // 36 / 0.018 = 2000 pulses, one logical unit of travel
        assert_eq!(outcome.position, 9);
        assert_eq!(outcome.pulses_emitted, 2000);
        assert!(!outcome.at_limit);
        assert_eq!(c.pul_pin.rising_edges, 2000);
        // direction output low = left
        assert!(!c.dir_pin.state);
        // driver disabled after the train
        assert!(!c.en_pin.state);
    }

    #[test]
    fn test_left_limit_is_terminal() {
        let mut c = controller();
        for _ in 0..10 {
            c.move_to(left(36.0)).unwrap();
        }
        assert_eq!(c.position(), 0);

        let outcome = c.move_to(left(36.0)).unwrap();
        assert_eq!(outcome.position, 0);
        assert_eq!(outcome.pulses_emitted, 0);
        assert!(outcome.at_limit);
    }

    #[test]
    fn test_right_limit_is_terminal() {
        let mut c = controller();
        for _ in 0..10 {
            c.move_to(right(36.0)).unwrap();
        }
        assert_eq!(c.position(), 20);

        let outcome = c.move_to(right(36.0)).unwrap();
        assert_eq!(outcome.position, 20);
        assert_eq!(outcome.pulses_emitted, 0);
        assert!(outcome.at_limit);
        assert!(c.dir_pin.state);
    }

    #[test]
    fn test_position_never_escapes_limits() {
        let mut c = controller();
        for i in 0..100 {
            let request = if i % 3 == 0 { right(30.0) } else { left(30.0) };
            let outcome = c.move_to(request).unwrap();
            assert!(c.config().contains(outcome.position));
        }
    }

    #[test]
    fn test_pulse_count_rounds() {
        let c = controller();
        // 30 / 0.018 = 1666.67, rounds to 1667
        assert_eq!(c.pulses_for(Degrees(30.0)), 1667);
        assert_eq!(c.pulses_for(Degrees(36.0)), 2000);
        assert_eq!(c.pulses_for(Degrees(0.0)), 0);
        // Negative angles are treated as no travel
        assert_eq!(c.pulses_for(Degrees(-5.0)), 0);
    }

    #[test]
    fn test_nudge_uses_default_angle() {
        let mut c = controller();
        let outcome = c.nudge(StepDirection::Right).unwrap();
        // default 30 deg at 0.018 deg/pulse
        assert_eq!(outcome.pulses_emitted, 1667);
        assert_eq!(outcome.position, 11);
    }

    #[test]
    fn test_reset_sequence() {
        let mut c = controller();
        c.reset().unwrap();
        assert!(!c.en_pin.state);
        assert!(c.rst_pin.state);
    }

    #[test]
    fn test_enable_wraps_each_train() {
        let mut c = controller();
        c.move_to(left(36.0)).unwrap();
        c.move_to(right(36.0)).unwrap();
        assert_eq!(c.en_pin.rising_edges, 2);
        assert!(!c.en_pin.state);
    }
}
