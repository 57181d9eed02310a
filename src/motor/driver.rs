//! Stepper motor driver.
//!
//! Generic over the embedded-hal 1.0 pin type of the four coil lines and the
//! pulse scheduler that times the ticks.

use embedded_hal::digital::OutputPin;

use crate::config::units::{Degrees, Rpm, Steps};
use crate::config::MotorConfig;
use crate::error::{MotionError, MotorError, Result};
use crate::motion::{excitation, speed, Direction, PhaseMode, RampController};
use crate::scheduler::PulseScheduler;

use super::coils::Coils;
use super::position::Position;
use super::state::MotorState;

/// Copy of the motion-relevant state of a motor.
///
/// Two snapshots compare equal when no command or tick changed the motor in
/// between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionSnapshot {
    /// Absolute position in ticks.
    pub current_step: i64,
    /// Target position (only meaningful for finite moves).
    pub target_step: i64,
    /// Direction of the current or last move.
    pub direction: Direction,
    /// Lifecycle state.
    pub state: MotorState,
    /// Rotating until stopped.
    pub free_run: bool,
    /// Nominal interval in µs per full step.
    pub interval: u32,
    /// Interval for the next tick, before half-phase halving.
    pub ramp_interval: u32,
    /// Step at which deceleration begins.
    pub decel_threshold: Option<i64>,
    /// Coil excitation mode.
    pub phase: PhaseMode,
    /// Ramp rate in µs per tick.
    pub acceleration: u16,
    /// Ramp start speed in RPM.
    pub start_speed: u8,
}

/// Four-wire unipolar stepper motor (ULN2003-style driver board).
///
/// Generic over:
/// - `P`: coil line type (must implement `OutputPin`)
/// - `S`: tick timer (must implement [`PulseScheduler`])
///
/// All commands return immediately unless blocking is requested; the caller
/// drives motion by calling [`poll`](Self::poll) from its loop.
pub struct StepperMotor<P, S>
where
    P: OutputPin,
    S: PulseScheduler,
{
    /// The four coil lines.
    coils: Coils<P>,

    /// Tick timer.
    scheduler: S,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,

    /// Full steps per output revolution.
    resolution: u16,

    /// Coil excitation mode.
    phase: PhaseMode,

    /// Nominal interval in µs per full step.
    interval: u32,

    /// Per-tick overhead subtracted from `interval`.
    delay_correction: u32,

    /// Ramp start speed in RPM.
    start_speed: u8,

    /// Blocking preference for commands without an explicit flag.
    blocking: bool,

    /// Current absolute position.
    position: Position,

    /// Final step of the current finite move.
    target_step: i64,

    /// Direction of the current or last move.
    direction: Direction,

    /// Lifecycle state.
    state: MotorState,

    /// Rotating until stopped.
    free_run: bool,

    /// Acceleration ramp.
    ramp: RampController,
}

impl<P, S> StepperMotor<P, S>
where
    P: OutputPin,
    S: PulseScheduler,
{
    /// Create a stopped motor from a validated configuration.
    ///
    /// All four lines are driven low, whatever state they were handed over in.
    pub(crate) fn new(pins: [P; 4], scheduler: S, config: MotorConfig) -> Result<Self> {
        let interval = speed::interval_from_speed(config.rpm.0, config.resolution as u32)?;

        let mut motor = Self {
            coils: Coils::new(pins),
            scheduler,
            position: Position::new(config.ticks_per_revolution()),
            name: config.name,
            resolution: config.resolution,
            phase: config.phase,
            interval,
            delay_correction: config.delay_correction,
            start_speed: config.start_speed,
            blocking: config.blocking,
            target_step: 0,
            direction: Direction::Clockwise,
            state: MotorState::Stopped,
            free_run: false,
            ramp: RampController::new(config.acceleration as u32),
        };
        motor.coils.release()?;
        Ok(motor)
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Get the lifecycle state.
    #[inline]
    pub fn state(&self) -> MotorState {
        self.state
    }

    /// Get the current state name.
    #[inline]
    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    /// Get current position in ticks.
    #[inline]
    pub fn current_step(&self) -> i64 {
        self.position.steps().value()
    }

    /// Get current position as a [`Steps`] value.
    #[inline]
    pub fn position_steps(&self) -> Steps {
        self.position.steps()
    }

    /// Get current position in output revolutions.
    #[inline]
    pub fn position_revolutions(&self) -> f32 {
        self.position.revolutions()
    }

    /// Get the target of the current finite move.
    ///
    /// `None` while stopped or free-running.
    #[inline]
    pub fn target_step(&self) -> Option<i64> {
        if self.state == MotorState::Stopped || self.free_run {
            None
        } else {
            Some(self.target_step)
        }
    }

    /// Get the direction of the current or last move.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Check if the motor rotates until explicitly stopped.
    #[inline]
    pub fn is_free_run(&self) -> bool {
        self.free_run
    }

    /// Get full steps per output revolution.
    #[inline]
    pub fn resolution(&self) -> u16 {
        self.resolution
    }

    /// Get the nominal speed.
    ///
    /// Reads 0 when the interval is too long to express in whole RPM.
    pub fn rpm(&self) -> Rpm {
        Rpm(speed::speed_from_interval(self.interval, self.resolution as u32).unwrap_or(0))
    }

    /// Get the nominal interval in µs per full step.
    #[inline]
    pub fn interval(&self) -> u32 {
        self.interval
    }

    /// Get the nominal interval minus the delay correction (at least 1 µs).
    ///
    /// While in motion this is the value captured when the motion started.
    #[inline]
    pub fn corrected_interval(&self) -> u32 {
        if self.state != MotorState::Stopped {
            self.ramp.corrected_interval()
        } else if self.interval > self.delay_correction {
            self.interval - self.delay_correction
        } else {
            1
        }
    }

    /// Get the interval the ramp will use for the next tick, per full step.
    #[inline]
    pub fn ramp_interval(&self) -> u32 {
        self.ramp.interval()
    }

    /// Get the coil excitation mode.
    #[inline]
    pub fn phase(&self) -> PhaseMode {
        self.phase
    }

    /// Get the delay correction in µs.
    #[inline]
    pub fn delay_correction(&self) -> u32 {
        self.delay_correction
    }

    /// Get the ramp rate in µs per tick (0 = ramping disabled).
    #[inline]
    pub fn acceleration(&self) -> u16 {
        self.ramp.rate() as u16
    }

    /// Get the ramp start speed in RPM.
    #[inline]
    pub fn start_speed(&self) -> u8 {
        self.start_speed
    }

    /// Get the blocking preference.
    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    /// Get the scheduler.
    #[inline]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Copy the motion-relevant state.
    pub fn snapshot(&self) -> MotionSnapshot {
        MotionSnapshot {
            current_step: self.current_step(),
            target_step: self.target_step,
            direction: self.direction,
            state: self.state,
            free_run: self.free_run,
            interval: self.interval,
            ramp_interval: self.ramp.interval(),
            decel_threshold: self.ramp.decel_threshold(),
            phase: self.phase,
            acceleration: self.acceleration(),
            start_speed: self.start_speed,
        }
    }

    /// Give back the pins and the scheduler.
    pub fn release(self) -> ([P; 4], S) {
        (self.coils.into_inner(), self.scheduler)
    }

    // ---------------------------------------------------------------------
    // Setters
    // ---------------------------------------------------------------------

    /// Set the nominal speed. Only while stopped.
    pub fn set_rpm(&mut self, rpm: Rpm) -> Result<()> {
        self.ensure_stopped()?;
        self.interval = speed::interval_from_speed(rpm.0, self.resolution as u32)?;
        Ok(())
    }

    /// Set the nominal interval in µs per full step. Only while stopped.
    pub fn set_interval(&mut self, interval_us: u32) -> Result<()> {
        self.ensure_stopped()?;
        if interval_us == 0 {
            return Err(MotionError::ZeroInterval.into());
        }
        self.interval = interval_us;
        Ok(())
    }

    /// Set the coil excitation mode. Only while stopped.
    pub fn set_phase(&mut self, phase: PhaseMode) -> Result<()> {
        self.ensure_stopped()?;
        self.phase = phase;
        self.position
            .set_ticks_per_revolution(speed::ticks_per_revolution(self.resolution as u32, phase));
        Ok(())
    }

    /// Set the ramp rate in µs per tick (0 disables ramping). Only while stopped.
    pub fn set_acceleration(&mut self, acceleration: u16) -> Result<()> {
        self.ensure_stopped()?;
        self.ramp.set_rate(acceleration as u32);
        Ok(())
    }

    /// Set the ramp start speed in RPM. Only while stopped.
    pub fn set_start_speed(&mut self, start_speed: u8) -> Result<()> {
        self.ensure_stopped()?;
        if start_speed == 0 {
            return Err(MotionError::ZeroSpeed.into());
        }
        self.start_speed = start_speed;
        Ok(())
    }

    /// Set the delay correction in µs. Applies from the next motion start.
    #[inline]
    pub fn set_delay_correction(&mut self, delay_correction: u32) {
        self.delay_correction = delay_correction;
    }

    /// Set the blocking preference.
    #[inline]
    pub fn set_blocking(&mut self, blocking: bool) {
        self.blocking = blocking;
    }

    // ---------------------------------------------------------------------
    // Motion commands
    // ---------------------------------------------------------------------

    /// Move by `count` ticks (positive = clockwise).
    ///
    /// With `blocking`, returns only once the motor has stopped again.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless stopped, `ZeroSteps` for `count == 0`,
    /// `StepsOutOfRange` when the target does not fit the position counter.
    pub fn move_by_steps(&mut self, count: i64, blocking: bool) -> Result<()> {
        self.ensure_stopped()?;
        if count == 0 {
            warn!("{}: zero-step move rejected", self.name.as_str());
            return Err(MotionError::ZeroSteps.into());
        }
        if self.interval == 0 {
            return Err(MotionError::ZeroInterval.into());
        }

        let from = self.current_step();
        let target = from.checked_add(count).ok_or_else(|| {
            warn!("{}: move of {} from {} overflows", self.name.as_str(), count, from);
            MotionError::StepsOutOfRange { from, count }
        })?;
        self.start(Some(target), Direction::from_steps(count))?;
        debug!(
            "{}: moving {} -> {}",
            self.name.as_str(),
            self.current_step(),
            target
        );

        if blocking {
            self.run_to_completion()?;
        }
        Ok(())
    }

    /// Move by `count` ticks using the blocking preference.
    #[inline]
    pub fn move_steps(&mut self, count: i64) -> Result<()> {
        self.move_by_steps(count, self.blocking)
    }

    /// Move by whole output revolutions (negative = counter-clockwise).
    pub fn move_by_revolutions(&mut self, revolutions: i32, blocking: bool) -> Result<()> {
        let ticks = self.position.ticks_per_revolution() as i64;
        self.move_by_steps(revolutions as i64 * ticks, blocking)
    }

    /// Move by whole output revolutions using the blocking preference.
    #[inline]
    pub fn move_revolutions(&mut self, revolutions: i32) -> Result<()> {
        self.move_by_revolutions(revolutions, self.blocking)
    }

    /// Move by an angle, rounded to the nearest tick.
    pub fn move_by_degrees(&mut self, delta: Degrees, blocking: bool) -> Result<()> {
        let ticks = self.position.ticks_for(delta);
        self.move_by_steps(ticks, blocking)
    }

    /// Rotate until [`stop`](Self::stop) or [`brake`](Self::brake).
    ///
    /// # Errors
    ///
    /// `InvalidState` unless stopped.
    pub fn move_continuous(&mut self, direction: Direction) -> Result<()> {
        self.ensure_stopped()?;
        if self.interval == 0 {
            return Err(MotionError::ZeroInterval.into());
        }

        self.start(None, direction)?;
        debug!("{}: free-running {}", self.name.as_str(), direction);
        Ok(())
    }

    /// Decelerate to a halt.
    ///
    /// Sets a new target just far enough ahead to ramp back down to the start
    /// speed; the motor brakes when it gets there. Without ramping the motor
    /// brakes on the next tick.
    ///
    /// # Errors
    ///
    /// `InvalidState` when already stopped.
    pub fn stop(&mut self) -> Result<()> {
        if self.state == MotorState::Stopped {
            return Err(MotorError::InvalidState(self.state).into());
        }

        let current = self.current_step();
        let ramp_down = self.ramp.decelerate_from(current) as i64;
        let mut target = current.saturating_add(self.direction.sign() * ramp_down);

        // A finite move never runs past its original target.
        if !self.free_run {
            target = match self.direction {
                Direction::Clockwise => target.min(self.target_step),
                Direction::CounterClockwise => target.max(self.target_step),
            };
        }

        self.target_step = target;
        self.free_run = false;
        debug!("{}: stopping at {}", self.name.as_str(), target);
        Ok(())
    }

    /// Freeze motion, keeping the coils energized for holding torque.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless moving.
    pub fn pause(&mut self) -> Result<()> {
        if self.state != MotorState::Moving {
            return Err(MotorError::InvalidState(self.state).into());
        }
        self.scheduler.pause();
        self.state = MotorState::Paused;
        debug!("{}: paused at {}", self.name.as_str(), self.current_step());
        Ok(())
    }

    /// Continue a paused motion where it left off.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless paused.
    pub fn resume(&mut self) -> Result<()> {
        if self.state != MotorState::Paused {
            return Err(MotorError::InvalidState(self.state).into());
        }
        self.scheduler.resume();
        self.state = MotorState::Moving;
        debug!("{}: resumed at {}", self.name.as_str(), self.current_step());
        Ok(())
    }

    /// Stop immediately and release all coils. Valid in any state.
    pub fn brake(&mut self) -> Result<()> {
        self.state = MotorState::Stopped;
        self.free_run = false;
        self.scheduler.cancel();
        self.coils.release()?;
        debug!("{}: braked at {}", self.name.as_str(), self.current_step());
        Ok(())
    }

    /// Run one tick if the scheduler says the current period has elapsed.
    ///
    /// Call this from the control loop. Returns whether a tick ran.
    pub fn poll(&mut self) -> Result<bool> {
        if self.state != MotorState::Moving || !self.scheduler.has_elapsed() {
            return Ok(false);
        }
        self.tick()?;
        Ok(true)
    }

    /// Handle one elapsed period: brake on arrival, otherwise advance one
    /// tick and rearm. No-op unless moving.
    pub fn tick(&mut self) -> Result<()> {
        if self.state != MotorState::Moving {
            return Ok(());
        }

        let current = self.current_step();
        if !self.free_run && self.has_arrived(current) {
            return self.brake();
        }

        let step = current + self.direction.sign();
        if let Err(e) = self.coils.energize(excitation(step, self.phase)) {
            // The period is spent; leave the motor stopped rather than stuck.
            self.abort();
            return Err(e.into());
        }
        self.position.advance(self.direction.sign());

        let next = self.ramp.next_interval(step, self.direction);
        self.scheduler.arm(self.tick_period(next));
        trace!("{}: step {} next {}us", self.name.as_str(), step, next);
        Ok(())
    }

    /// Poll on the calling context until the motor is no longer moving.
    ///
    /// Never returns while free-running; returns immediately when paused.
    pub fn run_to_completion(&mut self) -> Result<()> {
        while self.state == MotorState::Moving {
            self.poll()?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Toggles
    // ---------------------------------------------------------------------

    /// Stop if moving, otherwise move by `count` ticks.
    ///
    /// Returns `true` when a move was started.
    pub fn toggle_move_stop(&mut self, count: i64, blocking: bool) -> Result<bool> {
        if self.state == MotorState::Moving {
            self.stop()?;
            Ok(false)
        } else {
            self.move_by_steps(count, blocking)?;
            Ok(true)
        }
    }

    /// Stop if moving, otherwise move by whole revolutions.
    ///
    /// Returns `true` when a move was started.
    pub fn toggle_move_stop_by_revolutions(
        &mut self,
        revolutions: i32,
        blocking: bool,
    ) -> Result<bool> {
        if self.state == MotorState::Moving {
            self.stop()?;
            Ok(false)
        } else {
            self.move_by_revolutions(revolutions, blocking)?;
            Ok(true)
        }
    }

    /// Resume if paused, otherwise pause.
    ///
    /// Returns `true` when motion was resumed.
    pub fn toggle_pause_resume(&mut self) -> Result<bool> {
        if self.state == MotorState::Paused {
            self.resume()?;
            Ok(true)
        } else {
            self.pause()?;
            Ok(false)
        }
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn ensure_stopped(&self) -> Result<()> {
        if self.state != MotorState::Stopped {
            warn!("{}: rejected while {}", self.name.as_str(), self.state);
            return Err(MotorError::InvalidState(self.state).into());
        }
        Ok(())
    }

    /// Energize the current pattern, arm the ramp and the first tick.
    ///
    /// Nothing is committed if the coils cannot be driven.
    fn start(&mut self, target: Option<i64>, direction: Direction) -> Result<()> {
        let current = self.current_step();
        if let Err(e) = self.coils.energize(excitation(current, self.phase)) {
            self.abort();
            return Err(e.into());
        }

        let corrected = self.corrected_interval();
        let start_interval =
            speed::interval_from_speed(self.start_speed as u32, self.resolution as u32)
                .unwrap_or(corrected);
        let first = self.ramp.begin(start_interval, corrected, target, direction);

        self.direction = direction;
        self.target_step = target.unwrap_or(current);
        self.free_run = target.is_none();
        self.state = MotorState::Moving;
        self.scheduler.arm(self.tick_period(first));
        Ok(())
    }

    /// Force `Stopped` after a pin failure, releasing the coils as far as
    /// they still respond.
    fn abort(&mut self) {
        self.state = MotorState::Stopped;
        self.free_run = false;
        self.scheduler.cancel();
        if self.coils.release().is_err() {
            warn!("{}: coils could not be released", self.name.as_str());
        }
    }

    #[inline]
    fn has_arrived(&self, current: i64) -> bool {
        match self.direction {
            Direction::Clockwise => current >= self.target_step,
            Direction::CounterClockwise => current <= self.target_step,
        }
    }

    /// Scheduler period for a full-step interval (half-phase ticks twice).
    #[inline]
    fn tick_period(&self, interval: u32) -> u32 {
        (interval / self.phase.ticks_per_full_step()).max(1)
    }
}
