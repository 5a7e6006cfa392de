//! Simulation time model.
//!
//! The canonical unit is the `Tick`, a monotone `u64` counter; one tick is
//! one simulated minute unless the clock is built with another resolution.
//! Integer ticks keep all interval arithmetic exact — battery budgets, dwell
//! durations, and SLA intervals are compared without any floating-point
//! drift.  `SimClock` holds the mapping to wall-clock time:
//!
//!   wall_time = start_unix_secs + tick * tick_duration_secs
//!
//! A patrol year at minute resolution is 525,600 ticks, which is also the
//! pheromone decay horizon used by the network model.

use std::fmt;

/// Ticks in one simulated day at minute resolution.
pub const TICKS_PER_DAY: u64 = 24 * 60;

/// Ticks in one simulated year at minute resolution.
pub const TICKS_PER_YEAR: u64 = 365 * TICKS_PER_DAY;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick.
///
/// `u64` so overflow is a non-issue: a run would need to outlast the solar
/// system to wrap at minute resolution.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The run's clock: current tick plus the tick↔wall-clock mapping.
///
/// Plain data, cheap to copy, no heap.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (seconds since epoch) of tick 0.
    pub start_unix_secs: i64,
    /// Real seconds one tick represents.  Default: 60.
    pub tick_duration_secs: u32,
    /// Advanced once per loop iteration by [`advance`][SimClock::advance].
    pub current_tick: Tick,
}

impl Default for SimClock {
    fn default() -> Self {
        SimClock::new(0, 60)
    }
}

impl SimClock {
    pub fn new(start_unix_secs: i64, tick_duration_secs: u32) -> Self {
        Self {
            start_unix_secs,
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Simulated seconds elapsed since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> i64 {
        self.current_tick.0 as i64 * self.tick_duration_secs as i64
    }

    /// Unix timestamp of `current_tick`.
    #[inline]
    pub fn current_unix_secs(&self) -> i64 {
        self.start_unix_secs + self.elapsed_secs()
    }

    /// Elapsed time as (day, hour, minute) from sim start, for log lines
    /// without pulling in a datetime crate.
    pub fn elapsed_dhm(&self) -> (u64, u32, u32) {
        let total_secs = self.elapsed_secs().max(0) as u64;
        let days = total_secs / 86_400;
        let hours = ((total_secs % 86_400) / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        (days, hours, minutes)
    }

    // ── Tick-count helpers ────────────────────────────────────────────────

    /// Ticks spanning `secs` seconds, rounded up so durations never come out
    /// short.
    #[inline]
    pub fn ticks_for_secs(&self, secs: u64) -> u64 {
        secs.div_ceil(self.tick_duration_secs as u64)
    }

    #[inline]
    pub fn ticks_for_minutes(&self, minutes: u64) -> u64 {
        self.ticks_for_secs(minutes * 60)
    }

    #[inline]
    pub fn ticks_for_days(&self, days: u64) -> u64 {
        self.ticks_for_secs(days * 86_400)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (d, h, m) = self.elapsed_dhm();
        write!(f, "{} (day {} {:02}:{:02})", self.current_tick, d, h, m)
    }
}
