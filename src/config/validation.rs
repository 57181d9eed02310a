//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::motion::speed;

use super::{MotorConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks, for every motor:
/// - Resolution is positive
/// - Nominal speed and start speed are positive
/// - Nominal speed yields a non-zero interval at that resolution
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, motor) in config.motors.iter() {
        validate_motor(motor)?;
    }
    Ok(())
}

/// Validate a single motor configuration.
pub fn validate_motor(config: &MotorConfig) -> Result<()> {
    if config.resolution == 0 {
        return Err(Error::Config(ConfigError::InvalidResolution(config.resolution)));
    }

    if config.rpm.0 == 0 {
        return Err(Error::Config(ConfigError::InvalidRpm(config.rpm.0)));
    }

    if config.start_speed == 0 {
        return Err(Error::Config(ConfigError::InvalidStartSpeed(config.start_speed)));
    }

    if speed::interval_from_speed(config.rpm.0, config.resolution as u32).is_err() {
        return Err(Error::Config(ConfigError::SpeedOutOfRange {
            rpm: config.rpm.0,
            resolution: config.resolution,
        }));
    }

    Ok(())
}
