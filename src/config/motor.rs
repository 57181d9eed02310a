//! Motor configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::motion::{speed, PhaseMode};

use super::units::Rpm;

/// Complete motor configuration from TOML.
///
/// Defaults describe a 28BYJ-48 on a ULN2003 board.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MotorConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Full steps per output revolution.
    #[serde(default = "default_resolution")]
    pub resolution: u16,

    /// Coil excitation mode.
    #[serde(default)]
    pub phase: PhaseMode,

    /// Nominal speed.
    #[serde(default = "default_rpm")]
    pub rpm: Rpm,

    /// Ramp rate in µs per tick (0 disables ramping).
    #[serde(default)]
    pub acceleration: u16,

    /// Speed the ramp starts from, in RPM.
    #[serde(default = "default_start_speed")]
    pub start_speed: u8,

    /// Fixed per-tick processing overhead subtracted from the interval.
    #[serde(default, rename = "delay_correction_us")]
    pub delay_correction: u32,

    /// Default for commands that take no explicit blocking flag.
    #[serde(default)]
    pub blocking: bool,
}

fn default_resolution() -> u16 {
    2048
}

fn default_rpm() -> Rpm {
    Rpm(10)
}

fn default_start_speed() -> u8 {
    10
}

impl MotorConfig {
    /// Create a configuration with the default geometry and speeds.
    pub fn new(name: &str) -> Self {
        Self {
            name: String::try_from(name).unwrap_or_default(),
            resolution: default_resolution(),
            phase: PhaseMode::default(),
            rpm: default_rpm(),
            acceleration: 0,
            start_speed: default_start_speed(),
            delay_correction: 0,
            blocking: false,
        }
    }

    /// Nominal interval in µs per full step, if the speed is representable.
    pub fn interval_us(&self) -> Option<u32> {
        speed::interval_from_speed(self.rpm.0, self.resolution as u32).ok()
    }

    /// Ticks per output revolution in the configured phase mode.
    pub fn ticks_per_revolution(&self) -> u32 {
        speed::ticks_per_revolution(self.resolution as u32, self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MotorConfig::new("test");
        assert_eq!(config.resolution, 2048);
        assert_eq!(config.phase, PhaseMode::Half);
        assert_eq!(config.interval_us(), Some(2929));
        assert_eq!(config.ticks_per_revolution(), 4096);
    }

    #[test]
    fn test_unrepresentable_speed() {
        let mut config = MotorConfig::new("test");
        config.rpm = Rpm(0);
        assert_eq!(config.interval_us(), None);
    }
}
