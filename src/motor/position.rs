//! Position tracking for stepper motors.
//!
//! Provides absolute position tracking in ticks with unit conversions.

use libm::roundf;

use crate::config::units::{Degrees, Steps};

/// Motor position tracker.
///
/// Counts scheduler ticks from power-up: one tick is one full step in
/// one/two-phase mode and one half step in half-phase mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct Position {
    /// Current position in ticks (from origin)
    steps: Steps,
    /// Ticks per output revolution for conversions
    ticks_per_revolution: u32,
}

impl Position {
    /// Create a new position tracker at the origin.
    #[inline]
    pub fn new(ticks_per_revolution: u32) -> Self {
        Self {
            steps: Steps::default(),
            ticks_per_revolution,
        }
    }

    /// Get current position in ticks.
    #[inline]
    pub fn steps(&self) -> Steps {
        self.steps
    }

    /// Get current position in revolutions.
    #[inline]
    pub fn revolutions(&self) -> f32 {
        self.steps.0 as f32 / self.ticks_per_revolution as f32
    }

    /// Move by a single tick in the given sign.
    #[inline]
    pub fn advance(&mut self, sign: i64) {
        self.steps = Steps(self.steps.0 + sign);
    }

    /// Get ticks per revolution conversion factor.
    #[inline]
    pub fn ticks_per_revolution(&self) -> u32 {
        self.ticks_per_revolution
    }

    /// Update the conversion factor (phase mode changed).
    #[inline]
    pub fn set_ticks_per_revolution(&mut self, ticks: u32) {
        self.ticks_per_revolution = ticks;
    }

    /// Ticks covering `delta`, rounded to the nearest tick.
    #[inline]
    pub fn ticks_for(&self, delta: Degrees) -> i64 {
        roundf(delta.0 * self.ticks_per_revolution as f32 / 360.0) as i64
    }
}
