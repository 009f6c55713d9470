//! Fresh identifiers stamped onto molecules created by the [`Translator`](crate)
//! when a reaction crosses into a LATTICE or PARTICLE representation.
//!
//! Unlike [`SpeciesId`](crate::SpeciesId), a `ParticleId` names no shared
//! table entry — it only needs to be unique within a run, so it is a
//! plain monotonic counter rather than a slotmap key.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(u64);

/// Generator for fresh [`ParticleId`]s, owned by the coordinator and
/// threaded explicitly into translation rather than drawn from global state.
#[derive(Debug, Default, Clone)]
pub struct ParticleIdGen(u64);

impl ParticleIdGen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> ParticleId {
        self.0 += 1;
        ParticleId(self.0)
    }
}
