//! Command and output records
//!
//! This module contains the two records crossing the mixer boundary:
//! - [`ControlInput`]: the latest normalized four-axis command
//! - [`MotorOutputs`]: the per-rotor throttle vector produced by one mix

use heapless::Vec;

use super::geometry::MAX_ROTORS;

/// Normalized four-axis attitude/thrust command
///
/// Roll, pitch and yaw are conceptually in [-1, +1] and thrust in [0, 1].
/// Values outside those ranges are accepted and clamped during mixing,
/// never rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlInput {
    /// Roll command: -1.0 (full left) to +1.0 (full right)
    pub roll: f32,
    /// Pitch command: -1.0 (full nose-down) to +1.0 (full nose-up)
    pub pitch: f32,
    /// Yaw command: -1.0 to +1.0, sign per the geometry's torque convention
    pub yaw: f32,
    /// Collective thrust: 0.0 (idle) to 1.0 (full)
    pub thrust: f32,
}

impl ControlInput {
    /// Create a new command
    pub const fn new(roll: f32, pitch: f32, yaw: f32, thrust: f32) -> Self {
        Self {
            roll,
            pitch,
            yaw,
            thrust,
        }
    }

    /// Copy of this command with every axis confined to its range
    pub fn clamped(self) -> Self {
        Self {
            roll: self.roll.clamp(-1.0, 1.0),
            pitch: self.pitch.clamp(-1.0, 1.0),
            yaw: self.yaw.clamp(-1.0, 1.0),
            thrust: self.thrust.clamp(0.0, 1.0),
        }
    }
}

/// Per-rotor throttle commands produced by one mix pass
///
/// Produced fresh on every mix; nothing persists across calls.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorOutputs {
    /// Throttle per rotor in geometry index order, each in [0, 1]
    pub throttle: Vec<f32, MAX_ROTORS>,
    /// Uniform factor that would map the largest unclamped output back to
    /// 1.0 (1.0 when no rotor saturates high). Recorded as a saturation
    /// diagnostic only; outputs are clamped per rotor, not rescaled.
    pub output_scale: f32,
}

impl MotorOutputs {
    /// All-zero output vector for `count` rotors
    pub(crate) fn zeroed(count: usize) -> Self {
        let mut throttle = Vec::new();
        // Cannot overflow: count is bounded by MAX_ROTORS at geometry construction
        let _ = throttle.resize_default(count);
        Self {
            throttle,
            output_scale: 1.0,
        }
    }

    /// Number of throttle channels
    pub fn rotor_count(&self) -> usize {
        self.throttle.len()
    }

    /// Throttle values in rotor index order
    pub fn as_slice(&self) -> &[f32] {
        &self.throttle
    }

    /// True when at least one rotor hit its upper limit before clamping
    pub fn is_saturated(&self) -> bool {
        self.output_scale < 1.0
    }
}

impl Default for MotorOutputs {
    fn default() -> Self {
        Self {
            throttle: Vec::new(),
            output_scale: 1.0,
        }
    }
}
