//! Motor module for stepper-sequencer.
//!
//! Provides the motion state machine, its coil outputs and position tracking.

mod builder;
mod coils;
mod driver;
mod position;
mod state;

pub use builder::StepperMotorBuilder;
pub use coils::Coils;
pub use driver::{MotionSnapshot, StepperMotor};
pub use position::Position;
pub use state::MotorState;
