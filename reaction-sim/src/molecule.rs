//! The heterogeneous "last reaction" read model.
//!
//! [`Molecule`] is a sum type over the four geometric representations an
//! engine may report; [`ReactionInfo`] is the uniform envelope around it
//! that the [`crate::translator`] rewrites between representations.

use reaction_core::{ParticleId, SimTime, SpeciesId, Vec3};

/// One molecule as reported by an engine, in that engine's own representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Molecule {
    /// CONTINUOUS, WELLMIXED: just a species, no spatial attribute.
    Amount(SpeciesId),
    /// SUBVOLUME: a species located in one mesoscopic cell.
    Subvolume { species: SpeciesId, coord: usize },
    /// LATTICE: a species occupying one lattice site.
    Voxel {
        particle: ParticleId,
        species: SpeciesId,
        coord: usize,
        radius: f64,
        d: f64,
    },
    /// PARTICLE: a species at a continuous 3-space position.
    Particle {
        particle: ParticleId,
        species: SpeciesId,
        position: Vec3,
        radius: f64,
        d: f64,
    },
}

impl Molecule {
    pub fn species(&self) -> SpeciesId {
        match *self {
            Molecule::Amount(sp) => sp,
            Molecule::Subvolume { species, .. } => species,
            Molecule::Voxel { species, .. } => species,
            Molecule::Particle { species, .. } => species,
        }
    }

    pub fn position(&self) -> Option<Vec3> {
        match *self {
            Molecule::Particle { position, .. } => Some(position),
            _ => None,
        }
    }

    pub fn coord(&self) -> Option<usize> {
        match *self {
            Molecule::Subvolume { coord, .. } => Some(coord),
            Molecule::Voxel { coord, .. } => Some(coord),
            _ => None,
        }
    }
}

/// One reaction event, as reported by `EngineHandle::last_reactions`.
#[derive(Debug, Clone)]
pub struct ReactionInfo {
    pub t: SimTime,
    pub reactants: Vec<Molecule>,
    pub products: Vec<Molecule>,
}

impl ReactionInfo {
    pub fn new(t: SimTime, reactants: Vec<Molecule>, products: Vec<Molecule>) -> Self {
        Self {
            t,
            reactants,
            products,
        }
    }

    pub fn product_species(&self) -> impl Iterator<Item = SpeciesId> + '_ {
        self.products.iter().map(Molecule::species)
    }
}
