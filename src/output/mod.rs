//! Output-sink abstraction
//!
//! The mixer hands each finished [`MotorOutputs`] to an [`OutputSink`]
//! exactly once per triggering command. A sink forwards the throttle vector
//! to whatever carries it further: a PWM bank, a telemetry publisher, a
//! simulator. Only the PWM path ships in this crate; transport-backed sinks
//! belong to downstream crates.

pub mod pwm;

pub use pwm::{pulse_to_duty_cycle, throttle_to_pulse, PwmPin, PwmSink, ThrottleCalibration};

use crate::mixer::MotorOutputs;

/// Output delivery error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// Output vector length differs from the sink's channel count
    ChannelMismatch {
        /// Channels the sink drives
        expected: usize,
        /// Rotor count of the offered outputs
        actual: usize,
    },
    /// Downstream hardware or transport rejected the write
    HardwareFault,
}

impl core::fmt::Display for OutputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OutputError::ChannelMismatch { expected, actual } => {
                write!(
                    f,
                    "channel mismatch: sink drives {}, outputs carry {}",
                    expected, actual
                )
            }
            OutputError::HardwareFault => write!(f, "output hardware fault"),
        }
    }
}

/// Receives finished per-rotor throttle commands
///
/// Values arrive in rotor index order, already confined to [0, 1]. The
/// channel count is fixed so geometry mismatches can be rejected when the
/// mixer pipeline is assembled rather than on the hot path.
pub trait OutputSink {
    /// Number of throttle channels this sink drives
    fn channel_count(&self) -> usize;

    /// Forward one output vector downstream
    ///
    /// # Errors
    ///
    /// `OutputError::ChannelMismatch` if the vector length disagrees with
    /// [`channel_count`](OutputSink::channel_count);
    /// `OutputError::HardwareFault` if the downstream write fails.
    fn write(&mut self, outputs: &MotorOutputs) -> Result<(), OutputError>;
}
