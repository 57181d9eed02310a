//! Error types for stepper-sequencer.
//!
//! Provides unified error handling across configuration, motor control, and motion commands.
//!
//! Precondition violations (wrong lifecycle state) surface as
//! [`MotorError::InvalidState`]; bad numeric input surfaces as a
//! [`MotionError`]. Either way the motor is left untouched.

use core::fmt;

use crate::motor::MotorState;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all stepper-sequencer operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Motor operation error
    Motor(MotorError),
    /// Invalid motion command or parameter
    Motion(MotionError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// A required builder field was not provided
    MissingField(&'static str),
    /// Resolution must be > 0
    InvalidResolution(u16),
    /// Nominal speed must be > 0
    InvalidRpm(u32),
    /// Start speed must be > 0
    InvalidStartSpeed(u8),
    /// Speed too high for the resolution (interval would be 0 µs)
    SpeedOutOfRange {
        /// Configured speed in RPM
        rpm: u32,
        /// Configured resolution in full steps per revolution
        resolution: u16,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Motor operation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// Pin operation failed
    PinError,
    /// Motor is in wrong state for requested operation
    InvalidState(MotorState),
}

/// Invalid arguments to motion commands and speed conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionError {
    /// Move of zero steps requested
    ZeroSteps,
    /// Speed of 0 RPM requested
    ZeroSpeed,
    /// Interval of 0 µs requested
    ZeroInterval,
    /// Resolution of 0 steps per revolution
    ZeroResolution,
    /// Speed/interval conversion truncates to zero
    SpeedOutOfRange {
        /// Requested speed or interval
        value: u32,
        /// Resolution used for the conversion
        resolution: u32,
    },
    /// Target step would fall outside the i64 position range
    StepsOutOfRange {
        /// Position the move starts from
        from: i64,
        /// Requested displacement
        count: i64,
    },
}

impl Error {
    /// True for wrong-state rejections.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Error::Motor(MotorError::InvalidState(_)))
    }

    /// True for rejected numeric input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::Motion(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
            Error::Motion(e) => write!(f, "Motion error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::MissingField(field) => write!(f, "{} is required", field),
            ConfigError::InvalidResolution(v) => write!(f, "Invalid resolution: {}. Must be > 0", v),
            ConfigError::InvalidRpm(v) => write!(f, "Invalid rpm: {}. Must be > 0", v),
            ConfigError::InvalidStartSpeed(v) => {
                write!(f, "Invalid start speed: {}. Must be > 0", v)
            }
            ConfigError::SpeedOutOfRange { rpm, resolution } => {
                write!(f, "Speed {} rpm is too high for resolution {}", rpm, resolution)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::PinError => write!(f, "GPIO pin operation failed"),
            MotorError::InvalidState(state) => {
                write!(f, "Operation not allowed while {}", state.name())
            }
        }
    }
}

impl fmt::Display for MotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotionError::ZeroSteps => write!(f, "Move of zero steps"),
            MotionError::ZeroSpeed => write!(f, "Speed must be > 0 rpm"),
            MotionError::ZeroInterval => write!(f, "Interval must be > 0 us"),
            MotionError::ZeroResolution => write!(f, "Resolution must be > 0"),
            MotionError::SpeedOutOfRange { value, resolution } => {
                write!(f, "Value {} out of range for resolution {}", value, resolution)
            }
            MotionError::StepsOutOfRange { from, count } => {
                write!(f, "Move of {} steps from {} overflows the position", count, from)
            }
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

impl From<MotionError> for Error {
    fn from(e: MotionError) -> Self {
        Error::Motion(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

#[cfg(feature = "std")]
impl std::error::Error for MotionError {}
