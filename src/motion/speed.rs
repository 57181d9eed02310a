//! Speed ⇄ interval conversion.
//!
//! Intervals are microseconds per full step. Half-phase motion issues two
//! ticks per full step, so its tick period is half the converted interval
//! (equivalently: convert with [`ticks_per_revolution`] as the resolution).

use crate::error::MotionError;

use super::excitation::PhaseMode;

/// Microseconds in one minute.
pub const MICROS_PER_MINUTE: u64 = 60_000_000;

/// Interval in µs per step for `rpm` at `resolution` steps per revolution.
///
/// # Errors
///
/// Rejects zero inputs, and speeds so high that the interval truncates to 0.
pub fn interval_from_speed(rpm: u32, resolution: u32) -> Result<u32, MotionError> {
    if rpm == 0 {
        return Err(MotionError::ZeroSpeed);
    }
    divide_minute(rpm, resolution)
}

/// Speed in RPM for an interval of `interval_us` per step.
///
/// # Errors
///
/// Rejects zero inputs, and intervals so long that the speed truncates to 0.
pub fn speed_from_interval(interval_us: u32, resolution: u32) -> Result<u32, MotionError> {
    if interval_us == 0 {
        return Err(MotionError::ZeroInterval);
    }
    divide_minute(interval_us, resolution)
}

/// Scheduler ticks per output revolution.
#[inline]
pub fn ticks_per_revolution(resolution: u32, phase: PhaseMode) -> u32 {
    resolution.saturating_mul(phase.ticks_per_full_step())
}

// 60e6 / (resolution × value); the formula is its own inverse.
fn divide_minute(value: u32, resolution: u32) -> Result<u32, MotionError> {
    if resolution == 0 {
        return Err(MotionError::ZeroResolution);
    }
    let result = MICROS_PER_MINUTE / (resolution as u64 * value as u64);
    if result == 0 {
        return Err(MotionError::SpeedOutOfRange { value, resolution });
    }
    Ok(result as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_for_28byj48() {
        // 60e6 / (2048 * 10) = 2929.6875
        assert_eq!(interval_from_speed(10, 2048), Ok(2929));
        assert_eq!(speed_from_interval(2929, 2048), Ok(10));
    }

    #[test]
    fn test_zero_inputs_rejected() {
        assert_eq!(interval_from_speed(0, 2048), Err(MotionError::ZeroSpeed));
        assert_eq!(speed_from_interval(0, 2048), Err(MotionError::ZeroInterval));
        assert_eq!(interval_from_speed(10, 0), Err(MotionError::ZeroResolution));
    }

    #[test]
    fn test_truncation_to_zero_rejected() {
        assert!(matches!(
            interval_from_speed(60_000, 2048),
            Err(MotionError::SpeedOutOfRange { .. })
        ));
    }

    #[test]
    fn test_ticks_per_revolution() {
        assert_eq!(ticks_per_revolution(2048, PhaseMode::One), 2048);
        assert_eq!(ticks_per_revolution(2048, PhaseMode::Two), 2048);
        assert_eq!(ticks_per_revolution(2048, PhaseMode::Half), 4096);
    }

    #[test]
    fn test_half_phase_equivalence() {
        // Halving the full-step interval equals converting at doubled resolution.
        let full = interval_from_speed(10, 2048).unwrap();
        let doubled = interval_from_speed(10, ticks_per_revolution(2048, PhaseMode::Half)).unwrap();
        assert_eq!(full / 2, doubled);
    }
}
