//! Deterministic randomness, split into a fleet-level and a per-UAV stream.
//!
//! Every UAV owns a `SmallRng` seeded as
//!
//!   seed = global_seed XOR (agent_id * SEED_MIX)
//!
//! with `SEED_MIX` the 64-bit fractional part of the golden ratio, so
//! consecutive agent ids land far apart in seed space.  Consequences:
//!
//! - no UAV ever reads another UAV's stream, so fleet iteration order can
//!   change without changing any agent's decisions;
//! - appending UAVs to the roster leaves existing seeds untouched — a run
//!   stays reproducible as the fleet grows;
//! - one global seed plus the configuration pins the entire trace.
//!
//! Everything random in the simulator goes through these two wrappers.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// Golden-ratio fractional part, the usual multiplicative seed spreader.
const SEED_MIX: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-UAV deterministic RNG, created once at spawn and owned by the agent.
///
/// `!Sync` on purpose: the owning agent is the only legitimate caller.
pub struct AgentRng(SmallRng);

impl AgentRng {
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(SEED_MIX);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// The raw `SmallRng`, for `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform pick from a slice; `None` when empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// `true` with probability `p`, clamped into [0, 1].
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Fleet-level RNG for everything that is not one agent's decision: event
/// target selection, random dispatch picks, start placement.
///
/// Lives in the single-threaded tick loop.  Event generators do not share it;
/// they derive their own stream with [`child`][SimRng::child].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child stream, offset-mixed so two children of
    /// the same parent never coincide.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(SEED_MIX);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// The raw `SmallRng`, for `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform pick from a slice; `None` when empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }

    /// `true` with probability `p`, clamped into [0, 1].
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}
