//! Event generators.
//!
//! Two families:
//!
//! - **static**: an explicit tick list, filtered to the queried window.
//! - **probabilistic**: for each covered tick (stepping by `stride`) and each
//!   of `population` slots, draw a uniform value and fire below `likelihood`.
//!
//! # Determinism
//!
//! Probabilistic generators seed their sampling RNG from the base seed and
//! the queried population, so the same query always yields the same event
//! set — on a fresh generator instance too, not just via the memo.  The memo
//! only avoids resampling.
//!
//! Windows are half-open: `[first, last)`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use patrol_core::{SimRng, Tick};

use crate::event::{Event, EventKind};
use crate::{EventError, EventResult};

/// Memo key: one entry per distinct query.
type QueryKey = (usize, Tick, Tick);

/// A source of scheduled events for the simulation window.
///
/// `population` is the sampling cardinality — fleet size for failures, asset
/// count for inspection demand.  Implementations may mutate internal caches,
/// but the returned slice must be a pure function of the arguments and the
/// generator's configuration.
pub trait EventGenerator {
    fn events(&mut self, population: usize, first: Tick, last: Tick) -> &[Event];
}

// ── Static ────────────────────────────────────────────────────────────────────

/// Fires `kind` at an explicit list of ticks.
pub struct StaticEventGenerator {
    events: Vec<Event>,
    window: Vec<Event>,
}

impl StaticEventGenerator {
    pub fn new(ticks: Vec<Tick>, kind: EventKind) -> Self {
        let mut events: Vec<Event> =
            ticks.into_iter().map(|t| Event::new(t, kind)).collect();
        events.sort_by_key(|e| e.tick);
        Self { events, window: Vec::new() }
    }
}

impl EventGenerator for StaticEventGenerator {
    fn events(&mut self, _population: usize, first: Tick, last: Tick) -> &[Event] {
        self.window = self
            .events
            .iter()
            .copied()
            .filter(|e| e.tick >= first && e.tick < last)
            .collect();
        &self.window
    }
}

/// Fires failures at an explicit list of ticks, with a uniformly sampled
/// downtime in `[min_downtime, max_downtime]` per event.
///
/// Downtimes are sampled over the full configured tick list before window
/// filtering, so an event's downtime does not depend on the query window.
pub struct StaticFailureGenerator {
    ticks: Vec<Tick>,
    min_downtime: u64,
    max_downtime: u64,
    base_seed: u64,
    window: Vec<Event>,
}

impl StaticFailureGenerator {
    pub fn new(
        mut ticks: Vec<Tick>,
        min_downtime: u64,
        max_downtime: u64,
        base_seed: u64,
    ) -> EventResult<Self> {
        validate_downtime(min_downtime, max_downtime)?;
        ticks.sort();
        Ok(Self {
            ticks,
            min_downtime,
            max_downtime,
            base_seed,
            window: Vec::new(),
        })
    }
}

impl EventGenerator for StaticFailureGenerator {
    fn events(&mut self, _population: usize, first: Tick, last: Tick) -> &[Event] {
        let mut rng = SimRng::new(self.base_seed);
        self.window = self
            .ticks
            .iter()
            .map(|&t| {
                let downtime = rng.gen_range(self.min_downtime..=self.max_downtime);
                Event::new(t, EventKind::Failure { downtime })
            })
            .filter(|e| e.tick >= first && e.tick < last)
            .collect();
        &self.window
    }
}

// ── Probabilistic ─────────────────────────────────────────────────────────────

/// Bernoulli sampling per covered tick and slot.
pub struct ProbabilisticEventGenerator {
    stride: u64,
    likelihood: f64,
    kind: EventKind,
    base_seed: u64,
    memo: FxHashMap<QueryKey, Vec<Event>>,
}

impl ProbabilisticEventGenerator {
    pub fn new(
        stride: u64,
        likelihood: f64,
        kind: EventKind,
        base_seed: u64,
    ) -> EventResult<Self> {
        validate_sampling(stride, likelihood)?;
        Ok(Self {
            stride,
            likelihood,
            kind,
            base_seed,
            memo: FxHashMap::default(),
        })
    }

    fn generate(&self, population: usize, first: Tick, last: Tick) -> Vec<Event> {
        let mut rng = SimRng::new(self.base_seed).child(population as u64);
        let mut out = Vec::new();
        let mut t = first.0;
        while t < last.0 {
            for _slot in 0..population {
                if rng.gen_bool(self.likelihood) {
                    out.push(Event::new(Tick(t), self.kind));
                }
            }
            t += self.stride;
        }
        out
    }
}

impl EventGenerator for ProbabilisticEventGenerator {
    fn events(&mut self, population: usize, first: Tick, last: Tick) -> &[Event] {
        let key = (population, first, last);
        if !self.memo.contains_key(&key) {
            let events = self.generate(population, first, last);
            self.memo.insert(key, events);
        }
        &self.memo[&key]
    }
}

/// Bernoulli-sampled failures with in-flight tracking: a slot that fired is
/// excluded from sampling until strictly after its revival tick.
pub struct ProbabilisticFailureGenerator {
    stride: u64,
    likelihood: f64,
    min_downtime: u64,
    max_downtime: u64,
    base_seed: u64,
    memo: FxHashMap<QueryKey, Vec<Event>>,
}

impl ProbabilisticFailureGenerator {
    pub fn new(
        stride: u64,
        likelihood: f64,
        min_downtime: u64,
        max_downtime: u64,
        base_seed: u64,
    ) -> EventResult<Self> {
        validate_sampling(stride, likelihood)?;
        validate_downtime(min_downtime, max_downtime)?;
        Ok(Self {
            stride,
            likelihood,
            min_downtime,
            max_downtime,
            base_seed,
            memo: FxHashMap::default(),
        })
    }

    fn generate(&self, population: usize, first: Tick, last: Tick) -> Vec<Event> {
        let mut rng = SimRng::new(self.base_seed).child(population as u64);
        let mut out = Vec::new();
        // Min-heap of (revival tick, slot) plus the set of slots still down.
        let mut revivals: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::new();
        let mut down: FxHashSet<usize> = FxHashSet::default();

        let mut t = first.0;
        while t < last.0 {
            // Slots become eligible strictly after their revival tick.
            while let Some(&Reverse((revival, slot))) = revivals.peek() {
                if revival >= t {
                    break;
                }
                revivals.pop();
                down.remove(&slot);
            }
            for slot in 0..population {
                if down.contains(&slot) {
                    continue;
                }
                if rng.gen_bool(self.likelihood) {
                    let downtime = rng.gen_range(self.min_downtime..=self.max_downtime);
                    out.push(Event::new(Tick(t), EventKind::Failure { downtime }));
                    down.insert(slot);
                    revivals.push(Reverse((t + downtime, slot)));
                }
            }
            t += self.stride;
        }
        out
    }
}

impl EventGenerator for ProbabilisticFailureGenerator {
    fn events(&mut self, population: usize, first: Tick, last: Tick) -> &[Event] {
        let key = (population, first, last);
        if !self.memo.contains_key(&key) {
            let events = self.generate(population, first, last);
            self.memo.insert(key, events);
        }
        &self.memo[&key]
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

fn validate_sampling(stride: u64, likelihood: f64) -> EventResult<()> {
    if stride == 0 {
        return Err(EventError::InvalidStride);
    }
    if !(0.0..=1.0).contains(&likelihood) {
        return Err(EventError::InvalidLikelihood(likelihood));
    }
    Ok(())
}

fn validate_downtime(min: u64, max: u64) -> EventResult<()> {
    if min == 0 {
        return Err(EventError::ZeroDowntime);
    }
    if min > max {
        return Err(EventError::InvalidDowntimeRange { min, max });
    }
    Ok(())
}
