//! Rotor geometry tables
//!
//! A [`RotorGeometry`] describes how each rotor of a multirotor frame
//! responds to the roll, pitch and yaw control axes. The table is built once
//! at startup and stays immutable for the life of the mixer; its index order
//! defines actuator identity and must match the output channel order
//! expected downstream.

use heapless::Vec;
use libm::{cosf, sinf};

/// Maximum number of rotors a geometry can describe (octocopter frames).
pub const MAX_ROTORS: usize = 8;

/// One rotor's linear response to the control axes.
///
/// The scale factors are determined by the rotor's position on the frame and
/// its spin direction: a rotor on the right side carries a negative
/// `roll_scale` (it slows down to roll right), a front rotor a positive
/// `pitch_scale`, and `yaw_scale` follows the propeller's torque direction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rotor {
    /// Throttle response to the roll axis
    pub roll_scale: f32,
    /// Throttle response to the pitch axis
    pub pitch_scale: f32,
    /// Throttle response to the yaw axis (sign = torque direction)
    pub yaw_scale: f32,
}

impl Rotor {
    /// Create a rotor from explicit scale factors
    pub const fn new(roll_scale: f32, pitch_scale: f32, yaw_scale: f32) -> Self {
        Self {
            roll_scale,
            pitch_scale,
            yaw_scale,
        }
    }

    /// Derive roll/pitch factors from the rotor's azimuth on the frame
    ///
    /// Follows the ArduPilot motor-matrix convention: azimuth is measured
    /// clockwise from the nose, so a rotor at 90° sits on the right side and
    /// gets `roll_scale = -1.0`, `pitch_scale = 0.0`.
    ///
    /// # Arguments
    ///
    /// * `angle_deg` - Rotor azimuth in degrees (0 = front, 90 = right)
    /// * `yaw_factor` - Torque direction: +1.0 for CCW props, -1.0 for CW
    pub fn from_angle(angle_deg: f32, yaw_factor: f32) -> Self {
        let rad = angle_deg.to_radians();
        Self {
            roll_scale: -sinf(rad),
            pitch_scale: cosf(rad),
            yaw_scale: yaw_factor,
        }
    }
}

/// Errors detected while building a rotor geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeometryError {
    /// Geometry describes no rotors
    Empty,
    /// Geometry describes more rotors than the crate supports
    TooManyRotors {
        /// Number of rotors requested
        count: usize,
    },
    /// Rotor count differs from what the consumer of the outputs expects
    CountMismatch {
        /// Channel count expected by the consumer
        expected: usize,
        /// Rotor count the geometry describes
        actual: usize,
    },
}

impl core::fmt::Display for GeometryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GeometryError::Empty => write!(f, "rotor geometry is empty"),
            GeometryError::TooManyRotors { count } => {
                write!(f, "rotor geometry has {} rotors (max {})", count, MAX_ROTORS)
            }
            GeometryError::CountMismatch { expected, actual } => {
                write!(
                    f,
                    "rotor count mismatch: output expects {} channels, geometry has {}",
                    expected, actual
                )
            }
        }
    }
}

/// Ordered, fixed-length rotor table
///
/// Index order defines actuator identity: `rotor(0)` maps to output
/// channel 0 and so on. The table cannot be modified after construction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotorGeometry {
    rotors: Vec<Rotor, MAX_ROTORS>,
}

impl RotorGeometry {
    /// Build a geometry from a rotor table
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Empty` for a zero-rotor table and
    /// `GeometryError::TooManyRotors` above [`MAX_ROTORS`].
    pub fn new(rotors: &[Rotor]) -> Result<Self, GeometryError> {
        if rotors.is_empty() {
            return Err(GeometryError::Empty);
        }
        let mut table = Vec::new();
        table
            .extend_from_slice(rotors)
            .map_err(|_| GeometryError::TooManyRotors {
                count: rotors.len(),
            })?;
        Ok(Self { rotors: table })
    }

    /// Number of rotors in the table
    pub fn rotor_count(&self) -> usize {
        self.rotors.len()
    }

    /// Read one rotor's scale factors
    pub fn rotor(&self, index: usize) -> Option<&Rotor> {
        self.rotors.get(index)
    }

    /// The full table in index order
    pub fn as_slice(&self) -> &[Rotor] {
        &self.rotors
    }

    /// Reference 4-rotor quad-X table
    ///
    /// ```text
    ///    front
    ///      R2
    ///      |
    /// R0---+---R1
    ///      |
    ///      R3
    /// ```
    ///
    /// Scale factors `{(-1,0,1), (1,0,1), (0,1,-1), (0,-1,-1)}`.
    pub fn quad_x() -> Self {
        Self::from_table(&[
            Rotor::new(-1.0, 0.0, 1.0),
            Rotor::new(1.0, 0.0, 1.0),
            Rotor::new(0.0, 1.0, -1.0),
            Rotor::new(0.0, -1.0, -1.0),
        ])
    }

    /// 4-rotor "+" layout: front/back rotors carry pitch, left/right carry
    /// roll, torque alternating around the frame.
    pub fn quad_plus() -> Self {
        Self::from_table(&[
            Rotor::new(0.0, 1.0, 1.0),
            Rotor::new(0.0, -1.0, 1.0),
            Rotor::new(1.0, 0.0, -1.0),
            Rotor::new(-1.0, 0.0, -1.0),
        ])
    }

    /// Quadshot tilt-quad table (non-unit roll/pitch factors from the
    /// vehicle's swept rotor arms)
    pub fn quadshot() -> Self {
        Self::from_table(&[
            Rotor::new(-0.3223, 0.9466, 0.4242),
            Rotor::new(0.3223, -0.9466, 1.0),
            Rotor::new(0.3223, 0.9466, -0.4242),
            Rotor::new(-0.3223, -0.9466, -1.0),
        ])
    }

    fn from_table(rotors: &[Rotor]) -> Self {
        let mut table = Vec::new();
        // Preset tables are statically sized within MAX_ROTORS
        let _ = table.extend_from_slice(rotors);
        Self { rotors: table }
    }
}

/// Stock rotor layouts selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GeometryPreset {
    /// Four rotors in an X relative to the forward axis
    QuadX,
    /// Four rotors in a "+" relative to the forward axis
    QuadPlus,
    /// Four-rotor tilt-quad (Quadshot airframe)
    Quadshot,
}

impl GeometryPreset {
    /// Build the rotor table for this preset
    pub fn geometry(self) -> RotorGeometry {
        match self {
            GeometryPreset::QuadX => RotorGeometry::quad_x(),
            GeometryPreset::QuadPlus => RotorGeometry::quad_plus(),
            GeometryPreset::Quadshot => RotorGeometry::quadshot(),
        }
    }

    /// Preset name
    pub fn name(self) -> &'static str {
        match self {
            GeometryPreset::QuadX => "QuadX",
            GeometryPreset::QuadPlus => "QuadPlus",
            GeometryPreset::Quadshot => "Quadshot",
        }
    }
}
