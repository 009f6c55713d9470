//! The closed set of engine kinds the coordinator knows how to schedule
//! and translate between.
//!
//! A tagged union rather than five engine-specific Rust types: the set of
//! kinds is closed, and translation between them is a Cartesian product
//! best expressed as a match over two enum values.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// Deterministic, fixed-step integration; molecules are real-valued amounts.
    Continuous,
    /// Well-mixed stochastic (e.g. Gillespie SSA); next reaction is engine-chosen.
    WellMixed,
    /// Spatial subvolume (mesoscopic) stochastic simulation.
    Subvolume,
    /// Lattice/voxel-based stochastic simulation.
    Lattice,
    /// Brownian-dynamics particle simulation in continuous 3-space.
    Particle,
}

impl EngineKind {
    /// Whether this kind's scheduling is fixed-step (dt-driven) rather
    /// than discrete-event (engine-chosen `next_time`).
    pub fn is_fixed_step(self) -> bool {
        matches!(self, EngineKind::Continuous)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EngineKind::Continuous => "CONTINUOUS",
            EngineKind::WellMixed => "WELLMIXED",
            EngineKind::Subvolume => "SUBVOLUME",
            EngineKind::Lattice => "LATTICE",
            EngineKind::Particle => "PARTICLE",
        }
    }
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
