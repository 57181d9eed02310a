//! Pulse scheduling.
//!
//! [`StepperMotor`](crate::StepperMotor) never waits on its own; it arms a
//! [`PulseScheduler`] with the next tick period and asks it, on every
//! [`poll`](crate::StepperMotor::poll), whether that period has elapsed.
//! [`OneShotTimer`] is a ready-made scheduler over any monotonic
//! microsecond clock.

/// Rearmable one-shot timer consumed by the motor.
pub trait PulseScheduler {
    /// Arm for `interval_us` from now, replacing any pending period.
    fn arm(&mut self, interval_us: u32);

    /// Non-blocking check. Returns `true` once per armed period, then disarms.
    fn has_elapsed(&mut self) -> bool;

    /// Disarm without firing.
    fn cancel(&mut self);

    /// Freeze the pending period.
    fn pause(&mut self);

    /// Continue a frozen period with the time it had left.
    fn resume(&mut self);
}

/// Free-running microsecond counter. May wrap at `u32::MAX`.
pub trait MonotonicClock {
    /// Current time in microseconds.
    fn now_micros(&self) -> u32;
}

impl<F> MonotonicClock for F
where
    F: Fn() -> u32,
{
    #[inline]
    fn now_micros(&self) -> u32 {
        self()
    }
}

/// Clock backed by [`std::time::Instant`], counting from its creation.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Create a clock starting at zero now.
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl MonotonicClock for StdClock {
    fn now_micros(&self) -> u32 {
        // Truncation is the intended wrap.
        self.origin.elapsed().as_micros() as u32
    }
}

/// One-shot timer over a [`MonotonicClock`].
///
/// Elapsed time is computed with wrapping subtraction, so a clock wrap
/// between `arm` and `has_elapsed` is harmless for periods under ~71 minutes.
#[derive(Debug, Clone)]
pub struct OneShotTimer<C> {
    clock: C,
    armed: bool,
    paused: bool,
    started_at: u32,
    period: u32,
}

impl<C: MonotonicClock> OneShotTimer<C> {
    /// Create a disarmed timer.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            armed: false,
            paused: false,
            started_at: 0,
            period: 0,
        }
    }

    /// Check if a period is pending (including a paused one).
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Check if the pending period is frozen.
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Get the clock.
    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[inline]
    fn elapsed(&self) -> u32 {
        self.clock.now_micros().wrapping_sub(self.started_at)
    }
}

impl<C: MonotonicClock> PulseScheduler for OneShotTimer<C> {
    fn arm(&mut self, interval_us: u32) {
        self.started_at = self.clock.now_micros();
        self.period = interval_us;
        self.armed = true;
        self.paused = false;
    }

    fn has_elapsed(&mut self) -> bool {
        if !self.armed || self.paused {
            return false;
        }
        if self.elapsed() >= self.period {
            self.armed = false;
            return true;
        }
        false
    }

    fn cancel(&mut self) {
        self.armed = false;
        self.paused = false;
    }

    fn pause(&mut self) {
        if !self.armed || self.paused {
            return;
        }
        // Keep only what is left of the period.
        self.period = self.period.saturating_sub(self.elapsed());
        self.paused = true;
    }

    fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.started_at = self.clock.now_micros();
        self.paused = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn test_fires_once_after_period() {
        let now = Cell::new(1_000u32);
        let mut timer = OneShotTimer::new(|| now.get());

        timer.arm(500);
        now.set(1_499);
        assert!(!timer.has_elapsed());
        now.set(1_500);
        assert!(timer.has_elapsed());
        assert!(!timer.has_elapsed());
        assert!(!timer.is_armed());
    }

    #[test]
    fn test_survives_clock_wrap() {
        let now = Cell::new(u32::MAX - 100);
        let mut timer = OneShotTimer::new(|| now.get());

        timer.arm(300);
        now.set(150);
        assert!(!timer.has_elapsed());
        now.set(199);
        assert!(timer.has_elapsed());
    }

    #[test]
    fn test_pause_keeps_remaining_time() {
        let now = Cell::new(0u32);
        let mut timer = OneShotTimer::new(|| now.get());

        timer.arm(1_000);
        now.set(400);
        timer.pause();
        now.set(10_000);
        assert!(!timer.has_elapsed());

        timer.resume();
        now.set(10_599);
        assert!(!timer.has_elapsed());
        now.set(10_600);
        assert!(timer.has_elapsed());
    }

    #[test]
    fn test_cancel_disarms() {
        let now = Cell::new(0u32);
        let mut timer = OneShotTimer::new(|| now.get());

        timer.arm(10);
        timer.pause();
        timer.cancel();
        timer.resume();
        now.set(100);
        assert!(!timer.has_elapsed());
        assert!(!timer.is_paused());
    }
}
