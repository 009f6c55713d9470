//! The global scheduler: picks the event with the earliest native
//! step, advances it, propagates its effects to every peer to a fixed
//! point, then lets the winner discard whatever it doesn't own.

use rand::SeedableRng;
use rand::rngs::StdRng;
use reaction_core::{ParticleIdGen, SimTime, SpeciesId};

use crate::error::CoordError;
use crate::event::Event;

/// Run-wide settings supplied once at construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// Seeds the coordinator-owned RNG used for Translator draws on
    /// engines that don't expose their own.
    pub master_seed: u64,
    /// Whether an ownership violation found in debug assertions should
    /// panic (`true`, the default outside release builds) or only log.
    pub strict_ownership: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            master_seed: 0,
            strict_ownership: cfg!(debug_assertions),
        }
    }
}

impl Config {
    pub fn with_master_seed(mut self, seed: u64) -> Self {
        self.master_seed = seed;
        self
    }

    pub fn with_strict_ownership(mut self, strict: bool) -> Self {
        self.strict_ownership = strict;
        self
    }
}

/// Ordered collection of [`Event`]s plus the global clock driving them.
#[derive(Debug)]
pub struct Coordinator {
    events: Vec<Event>,
    t: SimTime,
    num_steps: u64,
    last_event: Option<usize>,
    config: Config,
    ids: ParticleIdGen,
    rng: StdRng,
}

impl Coordinator {
    pub fn new(config: Config) -> Self {
        let rng = StdRng::seed_from_u64(config.master_seed);
        Self {
            events: Vec::new(),
            t: SimTime::ZERO,
            num_steps: 0,
            last_event: None,
            config,
            ids: ParticleIdGen::new(),
            rng,
        }
    }

    /// Register an event. Events are totally ordered by `next_time()`
    /// with ties broken by insertion order; this order must stay stable
    /// across runs, so events are never removed once added.
    pub fn add_event(&mut self, event: Event) -> usize {
        self.events.push(event);
        self.events.len() - 1
    }

    pub fn t(&self) -> SimTime {
        self.t
    }

    pub fn num_steps(&self) -> u64 {
        self.num_steps
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn last_event(&self) -> Option<&Event> {
        self.last_event.map(|i| &self.events[i])
    }

    /// Population of `species` summed across every event that owns it.
    pub fn get_value(&self, species: SpeciesId) -> f64 {
        self.events
            .iter()
            .filter(|ev| ev.owns(species))
            .map(|ev| ev.world().get_value_exact(species))
            .sum()
    }

    #[tracing::instrument(skip(self))]
    pub fn initialize(&mut self) {
        self.check_ownership();
        for ev in &mut self.events {
            ev.initialize();
        }
        self.last_event = None;
    }

    /// Diagnostic pass over every registered event's `own` set: a species
    /// claimed by more than one event is always logged, and additionally
    /// asserted against in debug builds when `Config::strict_ownership`
    /// is set.
    fn check_ownership(&self) {
        let mut seen = std::collections::HashSet::new();
        for ev in &self.events {
            for species in ev.owned_species() {
                if !seen.insert(species) {
                    tracing::warn!(?species, "species is owned by more than one Event");
                    if self.config.strict_ownership {
                        debug_assert!(
                            false,
                            "species {species:?} is owned by more than one Event"
                        );
                    }
                }
            }
        }
    }

    /// Advance the simulation by one global step, or fast-forward to
    /// `upto` if no event is due before then.
    ///
    /// Returns `Ok(true)` iff a native step occurred; `Ok(false)` if the
    /// deadline was reached (or there are no events to advance).
    #[tracing::instrument(skip(self))]
    pub fn step(&mut self, upto: Option<SimTime>) -> Result<bool, CoordError> {
        self.num_steps += 1;
        self.last_event = None;

        let Some(winner_idx) = self.earliest_event_index() else {
            if let Some(deadline) = upto {
                self.t = deadline;
            }
            return Ok(false);
        };
        let tw = self.events[winner_idx].next_time();

        if let Some(deadline) = upto {
            if tw > deadline {
                tracing::debug!(deadline = %deadline, "no event due before deadline, fast-forwarding");
                self.t = deadline;
                self.interrupt_all(deadline, None, &[])?;
                return Ok(false);
            }
        }

        self.events[winner_idx].step();
        let actual = self.events[winner_idx].t();
        if actual != tw {
            return Err(CoordError::SchedulingViolation {
                expected: tw,
                actual,
            });
        }
        self.t = tw;
        self.last_event = Some(winner_idx);

        self.interrupt_all(tw, Some(winner_idx), &[winner_idx])?;
        self.events[winner_idx].sync();

        Ok(true)
    }

    fn earliest_event_index(&self) -> Option<usize> {
        self.events
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.next_time().cmp(&b.next_time()))
            .map(|(i, _)| i)
    }

    /// Interrupt every event not in `ignore`, cascading to a fixed point:
    /// any event whose state changed becomes a new winner for a further
    /// round, with `ignore` strictly growing so recursion is bounded by
    /// the number of events.
    fn interrupt_all(&mut self, t: SimTime, winner: Option<usize>, ignore: &[usize]) -> Result<(), CoordError> {
        let mut newly_changed = Vec::new();

        for i in 0..self.events.len() {
            if ignore.contains(&i) {
                continue;
            }

            let changed = if let Some(w) = winner {
                let (head, tail) = self.events.split_at_mut(i.max(w));
                let (peer, winner_ev) = if i < w {
                    (&mut head[i], &tail[0])
                } else {
                    (&mut tail[0], &head[w])
                };
                peer.interrupt(t, Some(winner_ev), &mut self.ids, &mut self.rng)?
            } else {
                self.events[i].interrupt(t, None, &mut self.ids, &mut self.rng)?
            };

            if changed {
                newly_changed.push(i);
            }
        }

        for i in newly_changed {
            let mut next_ignore = ignore.to_vec();
            next_ignore.push(i);
            self.interrupt_all(t, Some(i), &next_ignore)?;
        }

        Ok(())
    }
}
