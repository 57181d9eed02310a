//! Shared test doubles: coil lines backed by one state word and an always-ready scheduler.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use stepper_sequencer::config::MotorConfig;
use stepper_sequencer::{PulseScheduler, StepperMotor, StepperMotorBuilder};

/// Four output lines sharing one state word.
///
/// Writes can be made to fail to simulate a disconnected driver board.
#[derive(Clone, Default)]
pub struct Board {
    lines: Rc<Cell<u8>>,
    failing: Rc<Cell<bool>>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four lines, IN1..IN4.
    pub fn pins(&self) -> [BoardPin; 4] {
        [0, 1, 2, 3].map(|bit| BoardPin {
            bit,
            board: self.clone(),
        })
    }

    /// Current line state as an excitation pattern.
    pub fn pattern(&self) -> u8 {
        self.lines.get()
    }

    /// Make every following write fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn set(&self, bit: u8, high: bool) -> Result<(), ErrorKind> {
        if self.failing.get() {
            return Err(ErrorKind::Other);
        }
        let mask = 1 << bit;
        if high {
            self.lines.set(self.lines.get() | mask);
        } else {
            self.lines.set(self.lines.get() & !mask);
        }
        Ok(())
    }
}

pub struct BoardPin {
    bit: u8,
    board: Board,
}

impl ErrorType for BoardPin {
    type Error = ErrorKind;
}

impl OutputPin for BoardPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.board.set(self.bit, true)
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.board.set(self.bit, false)
    }
}

/// Fires on the first check after every arm; records what it was asked.
#[derive(Debug, Default)]
pub struct Ready {
    pub armed: bool,
    pub paused: bool,
    pub arms: Vec<u32>,
    pub cancels: usize,
}

impl PulseScheduler for Ready {
    fn arm(&mut self, interval_us: u32) {
        self.armed = true;
        self.arms.push(interval_us);
    }

    fn has_elapsed(&mut self) -> bool {
        let fired = self.armed && !self.paused;
        if fired {
            self.armed = false;
        }
        fired
    }

    fn cancel(&mut self) {
        self.armed = false;
        self.cancels += 1;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }
}

pub type TestMotor = StepperMotor<BoardPin, Ready>;

/// Build a motor on a fresh board.
pub fn motor(config: &MotorConfig) -> (TestMotor, Board) {
    let board = Board::new();
    let motor = StepperMotorBuilder::new()
        .from_motor_config(config)
        .pins(board.pins())
        .scheduler(Ready::default())
        .build()
        .expect("valid test motor");
    (motor, board)
}

/// Poll `n` times.
pub fn poll_n(motor: &mut TestMotor, n: usize) {
    for _ in 0..n {
        motor.poll().expect("poll");
    }
}
