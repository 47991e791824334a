//! Unit types for physical quantities.
//!
//! Provides a type-safe angle representation so move requests cannot be
//! confused with raw pulse counts at compile time.

use core::ops::{Add, Sub};

use serde::Deserialize;

/// Angular travel in degrees.
///
/// Used for configuration and the move-request API. Internally converted to
/// physical step pulses via the `degrees_per_pulse` calibration constant.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(transparent)]
pub struct Degrees(pub f32);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl Add for Degrees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
