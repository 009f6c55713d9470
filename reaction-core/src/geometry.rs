//! World geometry shared read-only by every engine and the Translator.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point or extent in the shared 3-space.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Elementwise product, used to scale a unit-cube jitter by edge lengths.
    pub fn scale(self, edge_lengths: Vec3) -> Vec3 {
        Vec3::new(
            self.x * edge_lengths.x,
            self.y * edge_lengths.y,
            self.z * edge_lengths.z,
        )
    }

    pub fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// The edge lengths of the shared simulation volume, read-only for the
/// duration of a run and passed explicitly wherever geometry is needed.
pub type EdgeLengths = Vec3;
