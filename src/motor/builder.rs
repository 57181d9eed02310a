//! Builder pattern for StepperMotor.

use embedded_hal::digital::OutputPin;

use crate::config::units::Rpm;
use crate::config::{validate_motor, MotorConfig, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motion::PhaseMode;
use crate::scheduler::PulseScheduler;

use super::driver::StepperMotor;

/// Builder for creating StepperMotor instances.
///
/// Starts from the defaults of [`MotorConfig::new`].
pub struct StepperMotorBuilder<P, S>
where
    P: OutputPin,
    S: PulseScheduler,
{
    pins: Option<[P; 4]>,
    scheduler: Option<S>,
    config: MotorConfig,
}

impl<P, S> Default for StepperMotorBuilder<P, S>
where
    P: OutputPin,
    S: PulseScheduler,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<P, S> StepperMotorBuilder<P, S>
where
    P: OutputPin,
    S: PulseScheduler,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            pins: None,
            scheduler: None,
            config: MotorConfig::new("motor"),
        }
    }

    /// Set the four coil lines, in IN1..IN4 order.
    pub fn pins(mut self, pins: [P; 4]) -> Self {
        self.pins = Some(pins);
        self
    }

    /// Set the tick scheduler.
    pub fn scheduler(mut self, scheduler: S) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        self.config.name = heapless::String::try_from(name).unwrap_or_default();
        self
    }

    /// Set full steps per output revolution.
    pub fn resolution(mut self, resolution: u16) -> Self {
        self.config.resolution = resolution;
        self
    }

    /// Set the coil excitation mode.
    pub fn phase(mut self, phase: PhaseMode) -> Self {
        self.config.phase = phase;
        self
    }

    /// Set the nominal speed.
    pub fn rpm(mut self, rpm: Rpm) -> Self {
        self.config.rpm = rpm;
        self
    }

    /// Set the ramp rate in µs per tick (0 disables ramping).
    pub fn acceleration(mut self, acceleration: u16) -> Self {
        self.config.acceleration = acceleration;
        self
    }

    /// Set the speed the ramp starts from, in RPM.
    pub fn start_speed(mut self, start_speed: u8) -> Self {
        self.config.start_speed = start_speed;
        self
    }

    /// Set the per-tick overhead correction in µs.
    pub fn delay_correction(mut self, delay_correction: u32) -> Self {
        self.config.delay_correction = delay_correction;
        self
    }

    /// Set the default blocking preference.
    pub fn blocking(mut self, blocking: bool) -> Self {
        self.config.blocking = blocking;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Configure from SystemConfig by motor name.
    pub fn from_config(self, config: &SystemConfig, motor_name: &str) -> Result<Self> {
        let motor_config = config.motor(motor_name).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(
                heapless::String::try_from(motor_name).unwrap_or_default(),
            ))
        })?;

        Ok(self.from_motor_config(motor_config))
    }

    /// Build the StepperMotor.
    ///
    /// # Errors
    ///
    /// Returns an error if pins or scheduler are missing or the configuration
    /// is invalid.
    pub fn build(self) -> Result<StepperMotor<P, S>> {
        let pins = self
            .pins
            .ok_or(Error::Config(ConfigError::MissingField("pins")))?;

        let scheduler = self
            .scheduler
            .ok_or(Error::Config(ConfigError::MissingField("scheduler")))?;

        validate_motor(&self.config)?;

        StepperMotor::new(pins, scheduler, self.config)
    }
}
