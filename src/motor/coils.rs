//! The four coil output lines.

use embedded_hal::digital::OutputPin;

use crate::error::MotorError;

/// Four output lines driving the coil driver inputs (IN1..IN4).
///
/// Line `i` follows bit `i` of an excitation pattern.
#[derive(Debug)]
pub struct Coils<P> {
    pins: [P; 4],
}

impl<P: OutputPin> Coils<P> {
    /// Take ownership of the four lines, in IN1..IN4 order.
    pub fn new(pins: [P; 4]) -> Self {
        Self { pins }
    }

    /// Drive every line according to `pattern`.
    pub fn energize(&mut self, pattern: u8) -> Result<(), MotorError> {
        for (bit, pin) in self.pins.iter_mut().enumerate() {
            if pattern & (1 << bit) != 0 {
                pin.set_high().map_err(|_| MotorError::PinError)?;
            } else {
                pin.set_low().map_err(|_| MotorError::PinError)?;
            }
        }
        Ok(())
    }

    /// De-energize all four lines.
    pub fn release(&mut self) -> Result<(), MotorError> {
        self.energize(0)
    }

    /// Give the pins back.
    pub fn into_inner(self) -> [P; 4] {
        self.pins
    }
}
