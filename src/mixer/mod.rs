//! Multirotor control allocation
//!
//! This module converts a normalized four-axis command (roll, pitch, yaw,
//! thrust) into per-rotor throttle values for a fixed [`RotorGeometry`],
//! with deterministic rebalancing when the command saturates the actuators.
//!
//! # Axis priority
//!
//! Under saturation the axes are traded off in a fixed order:
//!
//! 1. Thrust is never sacrificed to satisfy roll or pitch.
//! 2. Roll and pitch are preserved over yaw; yaw authority is the first
//!    thing reduced.
//! 3. If roll/pitch alone would still drive a rotor below zero, roll/pitch
//!    authority is rescaled uniformly across all rotors (never per rotor),
//!    keeping the relative attitude response proportional.
//!
//! # Examples
//!
//! ```
//! use rotor_mix::{ControlInput, MultirotorMixer, RotorGeometry};
//!
//! let mixer = MultirotorMixer::new(RotorGeometry::quad_x());
//!
//! // Pure thrust passes straight through
//! let out = mixer.mix(&ControlInput::new(0.0, 0.0, 0.0, 0.5));
//! assert_eq!(out.as_slice(), [0.5, 0.5, 0.5, 0.5]);
//! ```

pub mod geometry;
pub mod types;

pub use geometry::{GeometryError, GeometryPreset, Rotor, RotorGeometry, MAX_ROTORS};
pub use types::{ControlInput, MotorOutputs};

/// The control-allocation core
///
/// Owns an immutable rotor table for its whole lifetime; [`mix`] is a pure
/// function of the table and one command, so a mixer can be shared freely as
/// long as callers serialize their own invocations.
///
/// [`mix`]: MultirotorMixer::mix
#[derive(Debug, Clone)]
pub struct MultirotorMixer {
    geometry: RotorGeometry,
}

impl MultirotorMixer {
    /// Create a mixer over a fixed rotor table
    pub fn new(geometry: RotorGeometry) -> Self {
        Self { geometry }
    }

    /// The rotor table this mixer allocates over
    pub fn geometry(&self) -> &RotorGeometry {
        &self.geometry
    }

    /// Number of throttle outputs produced per mix
    pub fn rotor_count(&self) -> usize {
        self.geometry.rotor_count()
    }

    /// Allocate one command across the rotors
    ///
    /// Total over any input: out-of-range values are clamped, saturation is
    /// resolved by rebalancing, and every returned throttle lies in [0, 1].
    ///
    /// # Algorithm
    ///
    /// 1. Clamp roll/pitch/yaw to [-1, +1] and thrust to [0, 1].
    /// 2. Pass one (yaw deferred): `raw[i] = roll*roll_scale[i] +
    ///    pitch*pitch_scale[i] + thrust`. While scanning, yaw is shrunk in
    ///    place whenever adding it later would drive a currently-nonnegative
    ///    rotor below zero; each reduction carries over to the rotors that
    ///    follow. The minimum raw value is tracked (seeded at zero).
    /// 3. Pass two: if some raw output went negative, recompute every output
    ///    with roll/pitch scaled by `thrust / (thrust - min_out)` and yaw
    ///    dropped for this cycle. Otherwise add the limited yaw term.
    /// 4. Record `output_scale` (see [`MotorOutputs::output_scale`]) and
    ///    clamp each output independently to [0, 1].
    ///
    /// # Examples
    ///
    /// ```
    /// use rotor_mix::{ControlInput, MultirotorMixer, RotorGeometry};
    ///
    /// let mixer = MultirotorMixer::new(RotorGeometry::quad_x());
    ///
    /// // Full roll with no thrust: nothing left to rebalance with, so the
    /// // attitude demand collapses and all rotors stay at idle.
    /// let out = mixer.mix(&ControlInput::new(1.0, 0.0, 0.0, 0.0));
    /// assert_eq!(out.as_slice(), [0.0, 0.0, 0.0, 0.0]);
    /// ```
    pub fn mix(&self, input: &ControlInput) -> MotorOutputs {
        let cmd = input.clamped();
        let rotors = self.geometry.as_slice();
        let mut outputs = MotorOutputs::zeroed(rotors.len());

        let mut yaw = cmd.yaw;
        let mut min_out = 0.0_f32;

        // Pass one: roll/pitch/thrust only. Yaw is reduced just enough that
        // adding it afterwards cannot push an already-nonnegative rotor
        // below zero; later rotors test against the already-reduced value.
        for (out, rotor) in outputs.throttle.iter_mut().zip(rotors) {
            let raw = cmd.roll * rotor.roll_scale + cmd.pitch * rotor.pitch_scale + cmd.thrust;
            if raw >= 0.0 && raw < -yaw * rotor.yaw_scale {
                yaw = -raw / rotor.yaw_scale;
            }
            min_out = min_out.min(raw);
            *out = raw;
        }

        if min_out < 0.0 {
            // Roll/pitch demand exceeds what thrust can absorb: rescale
            // roll/pitch uniformly, keep total thrust, drop yaw this cycle.
            let scale_in = cmd.thrust / (cmd.thrust - min_out);
            for (out, rotor) in outputs.throttle.iter_mut().zip(rotors) {
                *out = scale_in * (cmd.roll * rotor.roll_scale + cmd.pitch * rotor.pitch_scale)
                    + cmd.thrust;
            }
        } else {
            // No clipping below zero: apply the limited yaw term.
            for (out, rotor) in outputs.throttle.iter_mut().zip(rotors) {
                *out += yaw * rotor.yaw_scale;
            }
        }

        // High-side saturation is resolved by the per-rotor clamp; the
        // uniform factor is recorded as a diagnostic only.
        let mut max_out = 0.0_f32;
        for &out in outputs.throttle.iter() {
            max_out = max_out.max(out);
        }
        outputs.output_scale = if max_out > 1.0 { 1.0 / max_out } else { 1.0 };

        for out in outputs.throttle.iter_mut() {
            *out = out.clamp(0.0, 1.0);
        }

        outputs
    }
}
