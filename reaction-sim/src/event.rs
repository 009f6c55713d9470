//! The scheduler-facing adapter around one engine: ownership and
//! borrow bookkeeping, native-step scheduling, and the interrupt/sync
//! protocol the [`crate::coordinator::Coordinator`] drives every tick.

use std::collections::{HashMap, HashSet};

use reaction_core::{EngineKind, SimTime, SpeciesId};

use crate::engine::EngineHandle;
use crate::error::CoordError;
use crate::molecule::{Molecule, ReactionInfo};
use crate::translator::{self, TranslationCtx};
use crate::world::World;

/// Discrete engines report their own `next_time`; CONTINUOUS engines are
/// driven by a fixed step size instead.
#[derive(Debug)]
enum Schedule {
    Discrete,
    FixedStep { t0: SimTime, dt: f64, steps_taken: u64 },
}

/// One engine plus everything the coordinator needs to schedule it and
/// translate its reactions to and from its peers.
#[derive(Debug)]
pub struct Event {
    engine: Box<dyn EngineHandle>,
    kind: EngineKind,
    owned: HashSet<SpeciesId>,
    borrows: HashMap<SpeciesId, SpeciesId>,
    schedule: Schedule,
    /// Synthetic reactions built by a CONTINUOUS event's `step`;
    /// empty for discrete kinds, which answer `updated()` from
    /// `engine.last_reactions()` directly.
    synthetic_reactions: Vec<ReactionInfo>,
    num_steps: u64,
}

impl Event {
    pub(crate) fn new_discrete(engine: Box<dyn EngineHandle>) -> Self {
        let kind = engine.kind();
        Self {
            engine,
            kind,
            owned: HashSet::new(),
            borrows: HashMap::new(),
            schedule: Schedule::Discrete,
            synthetic_reactions: Vec::new(),
            num_steps: 0,
        }
    }

    /// A fixed-step (CONTINUOUS) event advancing by `dt` each native step.
    pub fn new_fixed_step(engine: Box<dyn EngineHandle>, dt: f64) -> Self {
        assert!(dt > 0.0, "fixed-step dt must be positive");
        let kind = engine.kind();
        let t0 = engine.t();
        Self {
            engine,
            kind,
            owned: HashSet::new(),
            borrows: HashMap::new(),
            schedule: Schedule::FixedStep {
                t0,
                dt,
                steps_taken: 0,
            },
            synthetic_reactions: Vec::new(),
            num_steps: 0,
        }
    }

    pub fn kind(&self) -> EngineKind {
        self.kind
    }

    pub fn t(&self) -> SimTime {
        self.engine.t()
    }

    pub fn num_steps(&self) -> u64 {
        self.num_steps
    }

    pub fn own(&mut self, species: SpeciesId) {
        self.owned.insert(species);
    }

    pub fn borrow(&mut self, src: SpeciesId, dst: SpeciesId) {
        if self.owned.contains(&dst) {
            tracing::warn!(?dst, "borrow target is also an owned species");
        }
        self.borrows.insert(dst, src);
    }

    pub fn owns(&self, species: SpeciesId) -> bool {
        self.owned.contains(&species)
    }

    pub fn borrow_src(&self, species: SpeciesId) -> Option<SpeciesId> {
        self.borrows.get(&species).copied()
    }

    pub(crate) fn borrows(&self) -> impl Iterator<Item = (SpeciesId, SpeciesId)> + '_ {
        self.borrows.iter().map(|(&dst, &src)| (dst, src))
    }

    pub(crate) fn owned_species(&self) -> impl Iterator<Item = SpeciesId> + '_ {
        self.owned.iter().copied()
    }

    pub fn next_time(&self) -> SimTime {
        match self.schedule {
            Schedule::Discrete => self.engine.next_time(),
            Schedule::FixedStep { t0, dt, steps_taken } => {
                t0 + SimTime::new(dt * (steps_taken + 1) as f64)
            }
        }
    }

    /// Advance the engine one native step.
    #[tracing::instrument(skip(self), fields(kind = %self.kind))]
    pub fn step(&mut self) {
        let fixed_step_target = match &mut self.schedule {
            Schedule::Discrete => None,
            Schedule::FixedStep { t0, dt, steps_taken } => {
                let target = *t0 + SimTime::new(*dt * (*steps_taken + 1) as f64);
                *steps_taken += 1;
                Some(target)
            }
        };

        match fixed_step_target {
            None => self.engine.step(),
            Some(target) => {
                self.engine.step_until(target);
                self.synthetic_reactions = self.build_synthetic_reactions(target);
            }
        }
        self.num_steps += 1;
    }

    /// For CONTINUOUS: every non-owned species whose value has crossed a
    /// whole number is reported as `floor(value)` spontaneous creation
    /// reactions. Owned species stay purely continuous.
    fn build_synthetic_reactions(&self, t: SimTime) -> Vec<ReactionInfo> {
        let world = self.engine.world();
        world
            .list_species()
            .into_iter()
            .filter(|sp| !self.owns(*sp))
            .filter_map(|sp| {
                let value = world.get_value_exact(sp);
                let whole = value.floor();
                if whole >= 1.0 {
                    Some((sp, whole as u32))
                } else {
                    None
                }
            })
            .flat_map(|(sp, count)| {
                (0..count).map(move |_| ReactionInfo::new(t, Vec::new(), vec![Molecule::Amount(sp)]))
            })
            .collect()
    }

    pub fn last_reactions(&self) -> Vec<ReactionInfo> {
        match self.schedule {
            Schedule::Discrete => self.engine.last_reactions(),
            Schedule::FixedStep { .. } => self.synthetic_reactions.clone(),
        }
    }

    pub fn updated(&self) -> bool {
        !self.last_reactions().is_empty()
    }

    /// Re-express this event's last reactions in `peer`'s representation.
    pub fn translate_for(
        &self,
        peer: &Event,
        ids: &mut reaction_core::ParticleIdGen,
        rng: &mut dyn rand::RngCore,
    ) -> Result<Vec<ReactionInfo>, CoordError> {
        self.last_reactions()
            .iter()
            .map(|ri| {
                let mut ctx = TranslationCtx {
                    winner_kind: self.kind,
                    peer_kind: peer.kind,
                    winner_world: self.engine.world(),
                    peer_world: peer.engine.world(),
                    ids: &mut *ids,
                    rng: &mut *rng,
                };
                translator::translate(ri, &mut ctx)
            })
            .collect()
    }

    /// Called on the winner after every peer has been interrupted:
    /// removes any reaction product this event does not own.
    #[tracing::instrument(skip(self), fields(kind = %self.kind))]
    pub(crate) fn sync(&mut self) {
        let mut changed = false;

        match self.schedule {
            Schedule::Discrete => {
                let reactions = self.engine.last_reactions();
                let world = self.engine.world_mut();
                for ri in &reactions {
                    for product in &ri.products {
                        let sp = product.species();
                        if self.owned.contains(&sp) {
                            continue;
                        }
                        changed = true;
                        match *product {
                            Molecule::Amount(_) => world.remove_molecules(sp, 1, None),
                            Molecule::Subvolume { coord, .. } => world.remove_molecules(sp, 1, Some(coord)),
                            Molecule::Voxel { particle, .. } => world.remove_voxel(particle),
                            Molecule::Particle { particle, .. } => world.remove_particle(particle),
                        }
                    }
                }
            }
            Schedule::FixedStep { .. } => {
                let world = self.engine.world_mut();
                let species: Vec<_> = world.list_species();
                for sp in species {
                    if self.owned.contains(&sp) {
                        continue;
                    }
                    let value = world.get_value_exact(sp);
                    if value >= 1.0 {
                        world.set_value(sp, value - value.floor());
                        changed = true;
                    }
                }
                self.synthetic_reactions.clear();
            }
        }

        if changed {
            tracing::debug!(kind = %self.kind, "sync discarded non-owned products, reinitializing engine");
            self.engine.initialize();
        }
    }

    /// Called on every non-winner after the winner advances. Returns true
    /// iff this event's state changed and its engine needs re-initializing.
    ///
    /// `winner` is `None` for a deadline fast-forward, which every event
    /// handles identically via `step_until` and never changes state.
    pub(crate) fn interrupt(
        &mut self,
        t: SimTime,
        winner: Option<&Event>,
        ids: &mut reaction_core::ParticleIdGen,
        rng: &mut dyn rand::RngCore,
    ) -> Result<bool, CoordError> {
        let Some(winner) = winner else {
            self.engine.step_until(t);
            return Ok(false);
        };

        let mut changed = false;

        for (dst, src) in self.borrows().collect::<Vec<_>>() {
            if winner.owns(src) {
                let value = winner.engine.world().get_value_exact(src);
                let world = self.engine.world_mut();
                if world.get_value_exact(dst) != value {
                    world.set_value(dst, value);
                    changed = true;
                }
            } else {
                tracing::trace!(?src, ?dst, "mirror skipped: winner does not own borrow source");
            }
        }

        if winner.updated() {
            for translated in winner.translate_for(self, ids, rng)? {
                if self.consume_reaction(t, &translated) {
                    changed = true;
                }
            }
        }

        if changed {
            self.engine.initialize();
        }

        Ok(changed)
    }

    /// Create, in this event's world, every product molecule whose
    /// species this event owns. Returns true iff at least one was created.
    fn consume_reaction(&mut self, t: SimTime, ri: &ReactionInfo) -> bool {
        let mut consumed = false;
        for product in &ri.products {
            let sp = product.species();
            if !self.owns(sp) {
                continue;
            }
            self.engine.step_until(t);
            let world = self.engine.world_mut();
            match *product {
                Molecule::Amount(_) => world.add_molecules(sp, 1, None),
                Molecule::Subvolume { coord, .. } => world.add_molecules(sp, 1, Some(coord)),
                Molecule::Voxel { coord, .. } => {
                    world.new_voxel(sp, coord);
                }
                Molecule::Particle { position, .. } => {
                    world.new_particle(sp, position);
                }
            }
            consumed = true;
        }
        consumed
    }

    pub fn world(&self) -> &dyn World {
        self.engine.world()
    }

    pub fn world_mut(&mut self) -> &mut dyn World {
        self.engine.world_mut()
    }

    pub fn initialize(&mut self) {
        self.engine.initialize();
    }
}

/// Select the concrete `Event` scheduling variant by engine kind (one
/// struct, not five, since the set of kinds is closed).
pub fn simulator_event(engine: Box<dyn EngineHandle>) -> Result<Event, CoordError> {
    match engine.kind() {
        EngineKind::Continuous => Err(CoordError::ContinuousRequiresFixedStep),
        EngineKind::WellMixed | EngineKind::Subvolume | EngineKind::Lattice | EngineKind::Particle => {
            Ok(Event::new_discrete(engine))
        }
    }
}
