//! # stepper-sequencer
//!
//! Non-blocking, acceleration-aware sequencer for four-wire unipolar stepper
//! motors (28BYJ-48 on a ULN2003 board and similar), built on embedded-hal 1.0.
//!
//! ## Features
//!
//! - **Non-blocking**: Commands return immediately; motion advances from `poll()`
//! - **embedded-hal 1.0**: Four `OutputPin` coil lines, any tick timer
//! - **no_std compatible**: Core library works without standard library
//! - **Three excitation modes**: One-phase, two-phase and half-step
//! - **Linear ramps**: Accelerate from a start speed, decelerate before arrival
//! - **Pause/resume**: Coils stay energized while paused
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stepper_sequencer::{OneShotTimer, StdClock, StepperMotorBuilder, SystemConfig};
//!
//! // Load configuration from TOML
//! let config: SystemConfig = stepper_sequencer::load_config("motors.toml")?;
//!
//! // Create motor with embedded-hal pins
//! let mut motor = StepperMotorBuilder::new()
//!     .from_config(&config, "feeder")?
//!     .pins([in1, in2, in3, in4])
//!     .scheduler(OneShotTimer::new(StdClock::new()))
//!     .build()?;
//!
//! motor.move_revolutions(1)?;
//! loop {
//!     motor.poll()?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and [`StdClock`]
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;
pub mod scheduler;

// Re-exports for ergonomic API
pub use config::{validate_config, MotorConfig, SystemConfig};
pub use error::{Error, Result};
pub use motion::{excitation, Direction, PhaseMode};
pub use motor::{MotionSnapshot, MotorState, StepperMotor, StepperMotorBuilder};
pub use scheduler::{MonotonicClock, OneShotTimer, PulseScheduler};

#[cfg(feature = "std")]
pub use scheduler::StdClock;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, Rpm, Steps};
