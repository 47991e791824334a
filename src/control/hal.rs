//! Hardware seams consumed by the control loop.
//!
//! embedded-hal 1.0 has no blocking ADC trait, so the throttle sampler gets
//! a crate-local one. The actuator traits let the loop be tested against
//! recording fakes without threading every pin type parameter through it.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::error::Result;
use crate::stepper::{MoveOutcome, MoveRequest, PositionController};
use crate::throttle::{DriveCommand, DriveOutput};

/// Analog throttle sampler over the full 16-bit range.
///
/// Reads are infallible: out-of-range hardware behavior is clamped by the
/// implementation, never surfaced as an error.
pub trait ThrottleAdc {
    /// Read one raw sample in `[0, 65535]`.
    fn read(&mut self) -> u16;
}

/// Anything that can apply a drive command atomically.
pub trait DriveActuator {
    /// Apply a command; failures are fatal.
    fn apply(&mut self, cmd: DriveCommand) -> Result<()>;
}

impl<DIR, SD1, SD2, PWM> DriveActuator for DriveOutput<DIR, SD1, SD2, PWM>
where
    DIR: OutputPin,
    SD1: OutputPin,
    SD2: OutputPin,
    PWM: SetDutyCycle,
{
    fn apply(&mut self, cmd: DriveCommand) -> Result<()> {
        DriveOutput::apply(self, cmd)
    }
}

/// Anything that can execute a bounded move.
pub trait StepperActuator {
    /// Execute a move request to completion (blocking).
    fn execute(&mut self, request: MoveRequest) -> Result<MoveOutcome>;

    /// Current logical position.
    fn position(&self) -> i32;
}

impl<EN, RST, DIR, PUL, DELAY> StepperActuator for PositionController<EN, RST, DIR, PUL, DELAY>
where
    EN: OutputPin,
    RST: OutputPin,
    DIR: OutputPin,
    PUL: OutputPin,
    DELAY: DelayNs,
{
    fn execute(&mut self, request: MoveRequest) -> Result<MoveOutcome> {
        self.move_to(request)
    }

    fn position(&self) -> i32 {
        PositionController::position(self)
    }
}
