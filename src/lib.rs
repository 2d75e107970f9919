//! rotor_mix - Control-allocation mixing for multirotor vehicles
//!
//! Converts a normalized four-axis attitude/thrust command into per-rotor
//! throttle commands for a fixed rotor geometry, honoring actuator limits
//! and a fixed axis priority (thrust over roll/pitch over yaw) when the
//! command saturates.
//!
//! # Design Principles
//!
//! - **Pure no_std**: the algorithm has no platform dependencies and tests
//!   run on the host without feature flags
//! - **Trait abstractions**: output hardware is injected via [`OutputSink`]
//!   and [`output::pwm::PwmPin`]; transport layers stay in downstream crates
//! - **Pure core**: [`MultirotorMixer::mix`] is a pure function of one
//!   command and an immutable rotor table
//!
//! # Modules
//!
//! - [`mixer`]: rotor tables, command/output records, the mixing algorithm
//! - [`output`]: output-sink trait and the PWM throttle path
//! - [`dispatch`]: command-triggered invocation glue
//! - [`logging`]: log macro plumbing (defmt on embedded, println under test)

#![cfg_attr(not(test), no_std)]

pub mod dispatch;
pub mod logging;
pub mod mixer;
pub mod output;

pub use dispatch::MixerTask;
pub use mixer::{
    ControlInput, GeometryError, GeometryPreset, MotorOutputs, MultirotorMixer, Rotor,
    RotorGeometry, MAX_ROTORS,
};
pub use output::{OutputError, OutputSink};
