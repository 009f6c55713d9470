//! The contract the coordinator assumes of every simulation engine.
//!
//! The coordinator only ever calls through this trait; it never inspects
//! an engine's concrete type. Model construction, reaction-rule parsing,
//! and the engines' own internals are out of scope for this crate.

use reaction_core::{EngineKind, SimTime};

use crate::molecule::ReactionInfo;
use crate::world::World;

pub trait EngineHandle: std::fmt::Debug {
    fn kind(&self) -> EngineKind;

    /// (Re-)derive any cached scheduling state from the current world.
    /// Called once before the first step, and again after any
    /// cross-engine mutation of this engine's world.
    fn initialize(&mut self);

    /// The engine's current simulated time.
    fn t(&self) -> SimTime;

    /// The time of this engine's next native step. Only meaningful for
    /// discrete-event kinds; `Event` computes its own schedule for
    /// fixed-step (CONTINUOUS) engines and never calls this for them.
    fn next_time(&self) -> SimTime;

    /// Advance by exactly one native step (one reaction, or one dt tick).
    fn step(&mut self);

    /// Advance to exactly `upto`, without necessarily completing a native
    /// step (used for deadline fast-forward and for peer catch-up before
    /// a cross-engine product is created).
    fn step_until(&mut self, upto: SimTime);

    /// Reactions produced by the most recently completed `step`/`step_until`.
    fn last_reactions(&self) -> Vec<ReactionInfo>;

    fn world(&self) -> &dyn World;

    fn world_mut(&mut self) -> &mut dyn World;
}
