//! Error types for the rig-control library.
//!
//! Provides unified error handling across configuration, drive output,
//! stepper control, and the command/notify channel.
//!
//! Two conditions are deliberately *not* errors: a stepper move that hits a
//! soft limit (reported in [`crate::stepper::MoveOutcome`]) and a notify with
//! no connected peers (a no-op). Only fatal conditions - pin or PWM failures,
//! radio activation/registration failures, invalid configuration - surface
//! here.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all rig-control operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// DC motor drive output error
    Drive(DriveError),
    /// Stepper actuator error
    Stepper(StepperError),
    /// Command/notify channel error
    Channel(ChannelError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Dead-zone threshold must be below the ADC full scale
    InvalidDeadZone(u16),
    /// Drive maximum must be > 0
    InvalidDriveMax(u8),
    /// Invalid soft limits (left must be < right)
    InvalidSoftLimits {
        /// Left (minimum) limit
        left: i32,
        /// Right (maximum) limit
        right: i32,
    },
    /// Degrees-per-pulse calibration constant must be > 0
    InvalidDegreesPerPulse(f32),
    /// Pulse half period must be > 0 microseconds
    InvalidPulseHalfPeriod(u32),
    /// Tick period out of range (valid: 10-1000 ms)
    InvalidTickPeriod(u32),
    /// Device name empty or longer than 8 bytes
    InvalidDeviceName(heapless::String<32>),
    /// Advertising interval must be > 0 microseconds
    InvalidAdvInterval(u32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// DC motor drive output errors.
#[derive(Debug, Clone, PartialEq)]
pub enum DriveError {
    /// Direction or shutdown pin operation failed
    Pin,
    /// PWM duty update failed
    Pwm,
}

/// Stepper actuator errors.
#[derive(Debug, Clone, PartialEq)]
pub enum StepperError {
    /// EN/RST/DIR/PUL pin operation failed
    Pin,
}

/// Command/notify channel errors.
///
/// Transient conditions (peer drop, per-peer notify failure, unknown or
/// garbled inbound writes) are absorbed by the channel and never appear
/// here; these variants are fatal setup failures only.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelError {
    /// Radio role activation failed
    Activation,
    /// Service registration was rejected by the radio stack
    ServiceRegistration,
    /// Initial advertising could not be started
    Advertising,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Drive(e) => write!(f, "Drive error: {}", e),
            Error::Stepper(e) => write!(f, "Stepper error: {}", e),
            Error::Channel(e) => write!(f, "Channel error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidDeadZone(v) => {
                write!(f, "Invalid dead zone: {}. Must be below 65535", v)
            }
            ConfigError::InvalidDriveMax(v) => {
                write!(f, "Invalid drive max: {}. Must be > 0", v)
            }
            ConfigError::InvalidSoftLimits { left, right } => {
                write!(f, "Invalid soft limits: left ({}) must be < right ({})", left, right)
            }
            ConfigError::InvalidDegreesPerPulse(v) => {
                write!(f, "Invalid degrees per pulse: {}. Must be > 0", v)
            }
            ConfigError::InvalidPulseHalfPeriod(v) => {
                write!(f, "Invalid pulse half period: {} us. Must be > 0", v)
            }
            ConfigError::InvalidTickPeriod(v) => {
                write!(f, "Invalid tick period: {} ms. Must be 10-1000", v)
            }
            ConfigError::InvalidDeviceName(name) => {
                write!(f, "Invalid device name '{}'. Must be 1-8 bytes", name)
            }
            ConfigError::InvalidAdvInterval(v) => {
                write!(f, "Invalid advertising interval: {} us. Must be > 0", v)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for DriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveError::Pin => write!(f, "GPIO pin operation failed"),
            DriveError::Pwm => write!(f, "PWM duty update failed"),
        }
    }
}

impl fmt::Display for StepperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepperError::Pin => write!(f, "GPIO pin operation failed"),
        }
    }
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelError::Activation => write!(f, "Radio activation failed"),
            ChannelError::ServiceRegistration => write!(f, "Service registration failed"),
            ChannelError::Advertising => write!(f, "Could not start advertising"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DriveError> for Error {
    fn from(e: DriveError) -> Self {
        Error::Drive(e)
    }
}

impl From<StepperError> for Error {
    fn from(e: StepperError) -> Self {
        Error::Stepper(e)
    }
}

impl From<ChannelError> for Error {
    fn from(e: ChannelError) -> Self {
        Error::Channel(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for DriveError {}

#[cfg(feature = "std")]
impl std::error::Error for StepperError {}

#[cfg(feature = "std")]
impl std::error::Error for ChannelError {}
