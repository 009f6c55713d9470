use reaction_core::{EngineKind, SimTime, SpeciesId};

/// Fatal conditions surfaced to the embedder. Non-fatal conditions
/// (no-op interrupts, missing borrow sources, translation precision
/// overlap) are not represented here — they are logged and handled
/// in place instead.
#[derive(Debug, thiserror::Error)]
pub enum CoordError {
    #[error("no translation rule from {winner} to {peer}")]
    UnsupportedTranslation { winner: EngineKind, peer: EngineKind },

    #[error("engine kind not recognized by simulator_event")]
    UnknownEngineKind,

    #[error("CONTINUOUS engines must be built with continuous_event, not simulator_event")]
    ContinuousRequiresFixedStep,

    #[error("species {species:?} is owned by more than one Event")]
    OwnershipViolation { species: SpeciesId },

    #[error("engine did not reach its scheduled time: expected {expected}, got {actual}")]
    SchedulingViolation { expected: SimTime, actual: SimTime },
}
