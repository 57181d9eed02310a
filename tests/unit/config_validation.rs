//! Unit tests for configuration validation.

use stepper_sequencer::config::{validate_config, SystemConfig};
use stepper_sequencer::error::{ConfigError, Error};

fn parse(toml_str: &str) -> SystemConfig {
    toml::from_str(toml_str).expect("Failed to parse TOML")
}

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config = parse(
        r#"
[motors.a]
name = "a"
rpm = 12
acceleration = 50
start_speed = 3
"#,
    );
    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for zero resolution.
#[test]
fn test_zero_resolution() {
    let config = parse(
        r#"
[motors.a]
name = "a"
resolution = 0
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidResolution(0)))
    ));
}

/// Test validation fails for zero speed.
#[test]
fn test_zero_rpm() {
    let config = parse(
        r#"
[motors.a]
name = "a"
rpm = 0
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidRpm(0)))
    ));
}

/// Test validation fails when the interval would truncate to zero.
#[test]
fn test_speed_out_of_range() {
    let config = parse(
        r#"
[motors.a]
name = "a"
resolution = 4096
rpm = 20000
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::SpeedOutOfRange {
            rpm: 20000,
            resolution: 4096
        }))
    ));
}

/// Test that one bad motor fails the whole system.
#[test]
fn test_one_bad_motor_fails_system() {
    let config = parse(
        r#"
[motors.good]
name = "good"

[motors.bad]
name = "bad"
start_speed = 0
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStartSpeed(0)))
    ));
}
