//! Motor lifecycle state.

/// Lifecycle of a motor.
///
/// `Stopped` is both the initial and the terminal state. Motion-affecting
/// parameters can only be changed while `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorState {
    /// No pulse armed, all coils released.
    #[default]
    Stopped,
    /// Ticks are being issued.
    Moving,
    /// Ticks frozen; coils hold their last pattern.
    Paused,
}

impl MotorState {
    /// Get the state name as a static string.
    pub const fn name(self) -> &'static str {
        match self {
            MotorState::Stopped => "Stopped",
            MotorState::Moving => "Moving",
            MotorState::Paused => "Paused",
        }
    }
}

impl core::fmt::Display for MotorState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
