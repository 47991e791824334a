//! Step pulse driver.
//!
//! The leaf of the stepper stack: one pulse is assert, hold a half period,
//! deassert, hold again. Blocking by design - the pulse train's tight timing
//! is load-bearing and must not be interleaved with other work.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::{Result, StepperError};

/// Emits a single step pulse with a fixed half period.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepPulse {
    half_period_us: u32,
}

impl StepPulse {
    /// Create a pulse driver with the given half period in microseconds.
    #[inline]
    pub const fn new(half_period_us: u32) -> Self {
        Self { half_period_us }
    }

    /// The configured half period in microseconds.
    #[inline]
    pub const fn half_period_us(&self) -> u32 {
        self.half_period_us
    }

    /// Emit one pulse: high, hold, low, hold.
    pub fn emit<P, D>(&self, pin: &mut P, delay: &mut D) -> Result<()>
    where
        P: OutputPin,
        D: DelayNs,
    {
        pin.set_high().map_err(|_| StepperError::Pin)?;
        delay.delay_us(self.half_period_us);
        pin.set_low().map_err(|_| StepperError::Pin)?;
        delay.delay_us(self.half_period_us);
        Ok(())
    }
}
