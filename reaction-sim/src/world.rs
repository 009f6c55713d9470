//! The engine-side mutable state the coordinator reads and mutates.
//!
//! A `World` is kind-polymorphic: a WELLMIXED world only ever receives
//! `add_molecules`/`remove_molecules` calls with `coord: None`, a
//! SUBVOLUME world with `coord: Some(_)`, and so on. The coordinator
//! never calls a geometry method on a world whose `Event` isn't of a
//! kind that needs it, so the defaults below (returning zero/empty
//! values) are never observed in practice; they exist so a minimal
//! engine need not implement methods it has no use for.

use reaction_core::{ParticleId, SpeciesId, Vec3};

pub trait World: std::fmt::Debug {
    /// Species with nonzero population somewhere in this world.
    fn list_species(&self) -> Vec<SpeciesId>;

    /// Exact (possibly fractional, for CONTINUOUS) population of `species`.
    fn get_value_exact(&self, species: SpeciesId) -> f64;

    /// Overwrite the population of `species` (CONTINUOUS fractional-part bookkeeping).
    fn set_value(&mut self, species: SpeciesId, value: f64);

    /// Add `count` molecules of `species`, optionally at a subvolume coordinate.
    fn add_molecules(&mut self, species: SpeciesId, count: u32, coord: Option<usize>);

    /// Remove `count` molecules of `species`, optionally at a subvolume coordinate.
    fn remove_molecules(&mut self, species: SpeciesId, count: u32, coord: Option<usize>);

    /// Create one lattice-resident molecule, returning its fresh id.
    fn new_voxel(&mut self, species: SpeciesId, coord: usize) -> ParticleId {
        let _ = (species, coord);
        reaction_core::ParticleIdGen::new().next()
    }

    fn remove_voxel(&mut self, id: ParticleId) {
        let _ = id;
    }

    /// Create one free-space molecule, returning its fresh id.
    fn new_particle(&mut self, species: SpeciesId, position: Vec3) -> ParticleId {
        let _ = (species, position);
        reaction_core::ParticleIdGen::new().next()
    }

    fn remove_particle(&mut self, id: ParticleId) {
        let _ = id;
    }

    /// Number of addressable coordinate slots (subvolumes or lattice sites).
    fn num_sites(&self) -> usize {
        0
    }

    /// Per-cell edge lengths for a SUBVOLUME world's grid.
    fn subvolume_edge_lengths(&self) -> Vec3 {
        Vec3::ZERO
    }

    /// The (gx, gy, gz) grid index backing a linear subvolume/lattice coordinate.
    fn grid_index(&self, coord: usize) -> (usize, usize, usize) {
        let _ = coord;
        (0, 0, 0)
    }

    /// Map a continuous position to this world's nearest coordinate.
    fn position2coordinate(&self, position: Vec3) -> usize {
        let _ = position;
        0
    }

    /// Map a coordinate to this world's representative continuous position.
    fn coordinate2position(&self, coord: usize) -> Vec3 {
        let _ = coord;
        Vec3::ZERO
    }

    /// The shared simulation volume's edge lengths, for PARTICLE worlds.
    fn edge_lengths(&self) -> Vec3 {
        Vec3::ZERO
    }

    /// The engine's own RNG, if it exposes one; `Translator` falls back to
    /// a coordinator-owned RNG when this returns `None`.
    fn rng(&mut self) -> Option<&mut dyn rand::RngCore> {
        None
    }
}
