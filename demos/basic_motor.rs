//! Basic motor control example.
//!
//! Demonstrates building a motor from TOML configuration and driving a
//! ramped move from a non-blocking control loop, then a pause/resume and a
//! free-running spin stopped with a deceleration ramp.
//!
//! The coil lines are printed instead of driving real hardware.

use std::cell::Cell;
use std::rc::Rc;

use stepper_sequencer::{
    Direction, MotorState, OneShotTimer, StdClock, StepperMotor, StepperMotorBuilder,
};

/// Mock output pin that mirrors its level into a shared line word.
struct MockPin {
    bit: u8,
    lines: Rc<Cell<u8>>,
}

impl MockPin {
    fn bank() -> (Rc<Cell<u8>>, [MockPin; 4]) {
        let lines = Rc::new(Cell::new(0));
        let pins = [0, 1, 2, 3].map(|bit| MockPin {
            bit,
            lines: lines.clone(),
        });
        (lines, pins)
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.lines.set(self.lines.get() | (1 << self.bit));
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.lines.set(self.lines.get() & !(1 << self.bit));
        Ok(())
    }
}

type Motor = StepperMotor<MockPin, OneShotTimer<StdClock>>;

/// Poll until the motor leaves `Moving`, printing every `every` ticks.
fn drive(motor: &mut Motor, lines: &Cell<u8>, every: i64) {
    while motor.state() == MotorState::Moving {
        if motor.poll().expect("poll failed") && motor.current_step() % every == 0 {
            println!(
                "  step {:>5}  lines {:04b}  interval {:>5} us",
                motor.current_step(),
                lines.get(),
                motor.ramp_interval()
            );
        }
        // Other work of the control loop would go here.
    }
}

fn main() {
    println!("=== Basic Motor Control Example ===\n");

    let toml_content = r#"
[motors.demo]
name = "demo_motor"
resolution = 2048
phase = "half"
rpm = 12
acceleration = 40
start_speed = 4
"#;

    let config = stepper_sequencer::parse_config(toml_content).expect("Failed to parse config");
    let (lines, pins) = MockPin::bank();

    let mut motor = StepperMotorBuilder::new()
        .from_config(&config, "demo")
        .expect("Motor not in config")
        .pins(pins)
        .scheduler(OneShotTimer::new(StdClock::new()))
        .build()
        .expect("Failed to build motor");

    println!("Motor created: {}", motor.name());
    println!("Speed: {} rpm ({} us per step)", motor.rpm().0, motor.interval());
    println!("State: {}", motor.state_name());

    println!("\n=== Quarter turn ===");
    motor.move_by_steps(1024, false).expect("move rejected");
    drive(&mut motor, &lines, 128);
    println!("Position: {:.3} rev", motor.position_revolutions());

    println!("\n=== Pause and resume ===");
    motor.move_by_steps(-512, false).expect("move rejected");
    while motor.current_step() > 900 {
        motor.poll().expect("poll failed");
    }
    motor.pause().expect("pause rejected");
    println!("Paused at {} with lines {:04b}", motor.current_step(), lines.get());
    std::thread::sleep(std::time::Duration::from_millis(50));
    motor.resume().expect("resume rejected");
    drive(&mut motor, &lines, 128);
    println!("Position: {:.3} rev", motor.position_revolutions());

    println!("\n=== Free run, then stop ===");
    motor
        .move_continuous(Direction::Clockwise)
        .expect("move rejected");
    let stop_at = motor.current_step() + 600;
    while motor.current_step() < stop_at {
        motor.poll().expect("poll failed");
    }
    motor.stop().expect("stop rejected");
    println!("Stopping; ramp ends at {:?}", motor.target_step());
    drive(&mut motor, &lines, 64);

    println!("\nFinal state: {} at step {}", motor.state_name(), motor.current_step());
    println!("\n=== Example Complete ===");
}
