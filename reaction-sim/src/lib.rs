#![doc = include_str!("../README.md")]
#![deny(clippy::all)]

mod coordinator;
mod engine;
mod error;
mod event;
mod molecule;
mod translator;
mod world;

#[cfg(test)]
mod test_support;

pub use coordinator::{Config, Coordinator};
pub use engine::EngineHandle;
pub use error::CoordError;
pub use event::{simulator_event, Event};
pub use molecule::{Molecule, ReactionInfo};
pub use translator::{translate, TranslationCtx};
pub use world::World;

/// A fixed-step (CONTINUOUS) event advancing by `dt` each native step.
/// The `simulator_event` factory only builds discrete-event kinds; this
/// is the explicit counterpart for fixed-step use.
pub fn continuous_event(engine: Box<dyn EngineHandle>, dt: f64) -> Event {
    Event::new_fixed_step(engine, dt)
}
