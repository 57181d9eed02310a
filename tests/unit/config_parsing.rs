//! Unit tests for TOML configuration parsing.

use std::io::Write;

use stepper_sequencer::config::{load_config, SystemConfig};
use stepper_sequencer::{PhaseMode, Rpm};

/// Test parsing a fully specified motor configuration from TOML.
#[test]
fn test_parse_motor_config() {
    let toml_str = r#"
[motors.feeder]
name = "feeder"
resolution = 2048
phase = "two"
rpm = 15
acceleration = 30
start_speed = 6
delay_correction_us = 12
blocking = true
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let motor = config.motor("feeder").expect("Motor not found");

    assert_eq!(motor.name.as_str(), "feeder");
    assert_eq!(motor.resolution, 2048);
    assert_eq!(motor.phase, PhaseMode::Two);
    assert_eq!(motor.rpm, Rpm(15));
    assert_eq!(motor.acceleration, 30);
    assert_eq!(motor.start_speed, 6);
    assert_eq!(motor.delay_correction, 12);
    assert!(motor.blocking);
}

/// Test that omitted fields fall back to 28BYJ-48 defaults.
#[test]
fn test_parse_defaults() {
    let toml_str = r#"
[motors.a]
name = "a"
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let motor = config.motor("a").expect("Motor not found");

    assert_eq!(motor.resolution, 2048);
    assert_eq!(motor.phase, PhaseMode::Half);
    assert_eq!(motor.rpm, Rpm(10));
    assert_eq!(motor.acceleration, 0);
    assert_eq!(motor.start_speed, 10);
    assert_eq!(motor.delay_correction, 0);
    assert!(!motor.blocking);
}

/// Test parsing several motors keeps their order.
#[test]
fn test_parse_multiple_motors() {
    let toml_str = r#"
[motors.left]
name = "left"
phase = "one"

[motors.right]
name = "right"
phase = "half"
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let names: Vec<&str> = config.motor_names().collect();
    assert_eq!(names, vec!["left", "right"]);
    assert_eq!(config.motor("left").unwrap().phase, PhaseMode::One);
}

/// Test that an unknown phase name is rejected.
#[test]
fn test_parse_unknown_phase() {
    let toml_str = r#"
[motors.a]
name = "a"
phase = "quarter"
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test that an empty document yields no motors.
#[test]
fn test_parse_empty() {
    let config: SystemConfig = toml::from_str("").expect("Failed to parse TOML");
    assert_eq!(config.motor_names().count(), 0);
}

/// Test loading from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("stepper_sequencer_load_test.toml");
    let mut file = std::fs::File::create(&path).expect("create temp file");
    writeln!(file, "[motors.disk]\nname = \"disk\"\nrpm = 5").expect("write temp file");
    drop(file);

    let config = load_config(&path).expect("load config");
    assert_eq!(config.motor("disk").unwrap().rpm, Rpm(5));

    let _ = std::fs::remove_file(&path);
}
