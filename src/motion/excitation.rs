//! Coil excitation patterns.
//!
//! A pattern is a 4-bit code: bit `i` set means output line `i` is energized.
//!
//! | step | one    | two    | half   |
//! |------|--------|--------|--------|
//! | 0    | `0001` | `0011` | `0001` |
//! | 1    | `0010` | `0110` | `0011` |
//! | 2    | `0100` | `1100` | `0010` |
//! | 3    | `1000` | `1001` | `0110` |
//! | 4    |        |        | `0100` |
//! | 5    |        |        | `1100` |
//! | 6    |        |        | `1000` |
//! | 7    |        |        | `1001` |

use serde::Deserialize;

/// Coil excitation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[serde(rename_all = "snake_case")]
pub enum PhaseMode {
    /// One coil energized at a time (wave drive).
    One,
    /// Two adjacent coils energized at a time (full step, more torque).
    Two,
    /// Alternates one and two coils, eight half-steps per cycle.
    #[default]
    Half,
}

/// Pattern families indexed by `[family][sub-step]`.
const PATTERNS: [[u8; 4]; 2] = [
    // one-phase
    [0b0001, 0b0010, 0b0100, 0b1000],
    // two-phase
    [0b0011, 0b0110, 0b1100, 0b1001],
];

impl PhaseMode {
    /// Scheduler ticks issued per full motor step.
    #[inline]
    pub const fn ticks_per_full_step(self) -> u32 {
        match self {
            PhaseMode::One | PhaseMode::Two => 1,
            PhaseMode::Half => 2,
        }
    }

    /// Number of distinct patterns before the sequence repeats.
    #[inline]
    pub const fn cycle_len(self) -> i64 {
        match self {
            PhaseMode::One | PhaseMode::Two => 4,
            PhaseMode::Half => 8,
        }
    }

    /// Get the mode name as a static string.
    pub const fn name(self) -> &'static str {
        match self {
            PhaseMode::One => "one",
            PhaseMode::Two => "two",
            PhaseMode::Half => "half",
        }
    }
}

/// Pattern for `step` under `phase`.
///
/// Negative steps use floored arithmetic, so the sequence is continuous
/// through zero in both directions.
#[inline]
pub fn excitation(step: i64, phase: PhaseMode) -> u8 {
    match phase {
        PhaseMode::One => PATTERNS[0][step.rem_euclid(4) as usize],
        PhaseMode::Two => PATTERNS[1][step.rem_euclid(4) as usize],
        PhaseMode::Half => {
            let family = step.rem_euclid(2) as usize;
            let index = step.div_euclid(2).rem_euclid(4) as usize;
            PATTERNS[family][index]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_phase_sequence() {
        let seq: [u8; 4] = core::array::from_fn(|i| excitation(i as i64, PhaseMode::One));
        assert_eq!(seq, [0b0001, 0b0010, 0b0100, 0b1000]);
    }

    #[test]
    fn test_two_phase_sequence() {
        let seq: [u8; 4] = core::array::from_fn(|i| excitation(i as i64, PhaseMode::Two));
        assert_eq!(seq, [0b0011, 0b0110, 0b1100, 0b1001]);
    }

    #[test]
    fn test_half_phase_sequence() {
        let seq: [u8; 8] = core::array::from_fn(|i| excitation(i as i64, PhaseMode::Half));
        assert_eq!(
            seq,
            [0b0001, 0b0011, 0b0010, 0b0110, 0b0100, 0b1100, 0b1000, 0b1001]
        );
    }

    #[test]
    fn test_negative_steps_continue_sequence() {
        // Stepping back from 0 walks the table backwards.
        assert_eq!(excitation(-1, PhaseMode::One), 0b1000);
        assert_eq!(excitation(-1, PhaseMode::Two), 0b1001);
        assert_eq!(excitation(-1, PhaseMode::Half), 0b1001);
        assert_eq!(excitation(-2, PhaseMode::Half), 0b1000);
        assert_eq!(excitation(-8, PhaseMode::Half), excitation(0, PhaseMode::Half));
    }

    #[test]
    fn test_adjacent_half_steps_share_a_coil() {
        for step in -16..16 {
            let a = excitation(step, PhaseMode::Half);
            let b = excitation(step + 1, PhaseMode::Half);
            assert_ne!(a & b, 0, "steps {} and {} share no coil", step, step + 1);
        }
    }
}
