//! Motion module for stepper-sequencer.
//!
//! Provides excitation patterns, speed conversion and the acceleration ramp.

pub mod excitation;
mod ramp;
pub mod speed;

pub use excitation::{excitation, PhaseMode};
pub use ramp::RampController;
pub use speed::{interval_from_speed, speed_from_interval, ticks_per_revolution};

/// Direction of motor motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise (positive step count).
    #[default]
    Clockwise,
    /// Counter-clockwise (negative step count).
    CounterClockwise,
}

impl Direction {
    /// Get direction from signed step count.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}
