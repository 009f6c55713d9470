//! Minimal `World` fixtures used only by this crate's own unit tests
//! (the translator's coordinate math). Integration tests under `tests/`
//! build their own small reference engines instead, closer to what an
//! embedder actually supplies.

use reaction_core::{ParticleId, SpeciesId, Vec3};

use crate::world::World;

/// A `World` whose only interesting behavior is its subvolume/lattice
/// grid geometry; molecule storage is not modeled.
#[derive(Debug, Default)]
pub(crate) struct StubWorld {
    side: usize,
}

impl StubWorld {
    /// A cubic grid of `side^3` sites spanning a unit cube.
    pub(crate) fn grid(side: usize) -> Self {
        Self { side }
    }
}

impl World for StubWorld {
    fn list_species(&self) -> Vec<SpeciesId> {
        Vec::new()
    }

    fn get_value_exact(&self, _species: SpeciesId) -> f64 {
        0.0
    }

    fn set_value(&mut self, _species: SpeciesId, _value: f64) {}

    fn add_molecules(&mut self, _species: SpeciesId, _count: u32, _coord: Option<usize>) {}

    fn remove_molecules(&mut self, _species: SpeciesId, _count: u32, _coord: Option<usize>) {}

    fn new_voxel(&mut self, _species: SpeciesId, _coord: usize) -> ParticleId {
        reaction_core::ParticleIdGen::new().next()
    }

    fn new_particle(&mut self, _species: SpeciesId, _position: Vec3) -> ParticleId {
        reaction_core::ParticleIdGen::new().next()
    }

    fn num_sites(&self) -> usize {
        self.side.pow(3)
    }

    fn subvolume_edge_lengths(&self) -> Vec3 {
        if self.side == 0 {
            return Vec3::ZERO;
        }
        let s = 1.0 / self.side as f64;
        Vec3::new(s, s, s)
    }

    fn grid_index(&self, coord: usize) -> (usize, usize, usize) {
        if self.side == 0 {
            return (0, 0, 0);
        }
        (coord % self.side, (coord / self.side) % self.side, coord / (self.side * self.side))
    }

    fn position2coordinate(&self, position: Vec3) -> usize {
        if self.side == 0 {
            return 0;
        }
        let edge = self.subvolume_edge_lengths();
        let clamp = |v: f64| -> usize { (v as usize).min(self.side - 1) };
        let gx = clamp((position.x / edge.x).floor().max(0.0));
        let gy = clamp((position.y / edge.y).floor().max(0.0));
        let gz = clamp((position.z / edge.z).floor().max(0.0));
        gx + gy * self.side + gz * self.side * self.side
    }

    fn coordinate2position(&self, coord: usize) -> Vec3 {
        let (gx, gy, gz) = self.grid_index(coord);
        let edge = self.subvolume_edge_lengths();
        Vec3::new(
            (gx as f64 + 0.5) * edge.x,
            (gy as f64 + 0.5) * edge.y,
            (gz as f64 + 0.5) * edge.z,
        )
    }

    fn edge_lengths(&self) -> Vec3 {
        Vec3::new(1.0, 1.0, 1.0)
    }
}
