#![doc = include_str!("../README.md")]
#![deny(clippy::all)]

mod geometry;
mod ids;
mod kind;
mod species;
mod time;

pub use geometry::{EdgeLengths, Vec3};
pub use ids::{ParticleId, ParticleIdGen};
pub use kind::EngineKind;
pub use species::{SpeciesId, SpeciesTable};
pub use time::SimTime;
