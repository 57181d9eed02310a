//! Property tests for the pattern table, speed conversion and motion commands.

mod common;

use proptest::prelude::*;
use stepper_sequencer::config::MotorConfig;
use stepper_sequencer::motion::{interval_from_speed, speed_from_interval};
use stepper_sequencer::{excitation, MotorState, PhaseMode};

fn phase_mode() -> impl Strategy<Value = PhaseMode> {
    prop_oneof![
        Just(PhaseMode::One),
        Just(PhaseMode::Two),
        Just(PhaseMode::Half),
    ]
}

proptest! {
    #[test]
    fn pattern_table_is_periodic(step in -1_000_000i64..1_000_000, phase in phase_mode()) {
        let pattern = excitation(step, phase);
        prop_assert_eq!(pattern, excitation(step + 8, phase));
        if phase != PhaseMode::Half {
            prop_assert_eq!(pattern, excitation(step + 4, phase));
        }
    }

    #[test]
    fn patterns_are_never_empty(step in any::<i32>(), phase in phase_mode()) {
        let pattern = excitation(step as i64, phase);
        prop_assert!(pattern != 0 && pattern <= 0b1111);
    }

    #[test]
    fn conversion_round_trips(resolution in 1u32..=4096, rpm in 1u32..=60) {
        let interval = interval_from_speed(rpm, resolution).unwrap();
        let speed = speed_from_interval(interval, resolution).unwrap();

        prop_assert!(speed >= rpm);
        prop_assert_eq!(interval_from_speed(speed, resolution).unwrap(), interval);
    }

    #[test]
    fn finite_move_lands_on_target(
        count in -300i64..300,
        phase in phase_mode(),
        acceleration in 0u16..200,
        start_speed in 1u8..20,
    ) {
        prop_assume!(count != 0);

        let mut config = MotorConfig::new("prop");
        config.phase = phase;
        config.acceleration = acceleration;
        config.start_speed = start_speed;
        let (mut m, board) = common::motor(&config);

        m.move_by_steps(count, true).unwrap();

        prop_assert_eq!(m.current_step(), count);
        prop_assert_eq!(m.state(), MotorState::Stopped);
        prop_assert_eq!(board.pattern(), 0);
        prop_assert!(m.scheduler().arms.iter().all(|&p| p > 0));
    }
}
