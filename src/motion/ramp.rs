//! Acceleration ramp.
//!
//! The ramp works on full-step intervals in microseconds. Accelerating means
//! shrinking the interval by `rate` per tick toward the corrected interval;
//! decelerating means growing it by `rate` per tick back toward the interval
//! of the start speed.

use super::Direction;

/// Per-tick interval controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RampController {
    /// µs added or removed per tick; 0 disables ramping.
    rate: u32,
    /// Interval the ramp starts from and decelerates back to.
    start_interval: u32,
    /// Steady-state interval (overhead-corrected).
    corrected_interval: u32,
    /// Interval for the next tick.
    interval: u32,
    /// Step at which deceleration begins (None while free-running).
    decel_threshold: Option<i64>,
}

impl RampController {
    /// Create an idle controller with the given rate.
    pub const fn new(rate: u32) -> Self {
        Self {
            rate,
            start_interval: 0,
            corrected_interval: 0,
            interval: 0,
            decel_threshold: None,
        }
    }

    /// Check if ramping is enabled.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.rate != 0
    }

    /// Get the ramp rate (µs per tick).
    #[inline]
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Change the rate. Takes effect at the next [`begin`](Self::begin).
    #[inline]
    pub fn set_rate(&mut self, rate: u32) {
        self.rate = rate;
    }

    /// Get the interval for the next tick.
    #[inline]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Get the steady-state interval.
    #[inline]
    pub fn corrected_interval(&self) -> u32 {
        self.corrected_interval
    }

    /// Get the step at which deceleration begins.
    #[inline]
    pub fn decel_threshold(&self) -> Option<i64> {
        self.decel_threshold
    }

    /// Prepare a new motion and return the interval for the first tick.
    ///
    /// `target` is the final step of a finite move, or `None` when
    /// free-running.
    pub fn begin(
        &mut self,
        start_interval: u32,
        corrected_interval: u32,
        target: Option<i64>,
        direction: Direction,
    ) -> u32 {
        self.corrected_interval = corrected_interval;

        if !self.is_enabled() {
            self.start_interval = corrected_interval;
            self.interval = corrected_interval;
            self.decel_threshold = None;
            return self.interval;
        }

        self.start_interval = start_interval.max(corrected_interval);
        self.interval = self.start_interval;

        // Half the acceleration distance: stopping is less timing-sensitive
        // than starting, so the onset does not need to be exact.
        let ramp_ticks = ((self.start_interval - corrected_interval) / self.rate / 2) as i64;
        self.decel_threshold = target.map(|t| t.saturating_sub(direction.sign() * ramp_ticks));

        self.interval
    }

    /// Advance the ramp by one tick taken at `position`; returns the interval
    /// for the next tick.
    pub fn next_interval(&mut self, position: i64, direction: Direction) -> u32 {
        if !self.is_enabled() {
            return self.corrected_interval;
        }

        if self.is_past_threshold(position, direction) {
            self.interval = self.interval.saturating_add(self.rate).min(self.start_interval);
        } else {
            self.interval = self
                .interval
                .saturating_sub(self.rate)
                .max(self.corrected_interval);
        }

        self.interval
    }

    /// Start decelerating at `position`.
    ///
    /// Returns the number of ticks needed to slow from the current interval
    /// back to the start interval; 0 when ramping is disabled.
    pub fn decelerate_from(&mut self, position: i64) -> u32 {
        if !self.is_enabled() {
            return 0;
        }
        self.decel_threshold = Some(position);
        (self.start_interval - self.interval) / self.rate
    }

    fn is_past_threshold(&self, position: i64, direction: Direction) -> bool {
        match (self.decel_threshold, direction) {
            (None, _) => false,
            (Some(threshold), Direction::Clockwise) => position >= threshold,
            (Some(threshold), Direction::CounterClockwise) => position <= threshold,
        }
    }
}
