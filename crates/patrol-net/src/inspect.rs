//! The inspectable-entity contract: inspection history and pending flags.
//!
//! # Semantics
//!
//! Every asset that requires periodic inspection (node or edge) carries an
//! [`InspectionLog`].  The log is append-only and time-ordered: the tick loop
//! only ever records inspections at the current tick, so both lookup methods
//! can binary-search.
//!
//! "Needs inspection" is a level, not a pulse: an on-demand request raises the
//! flag, and only the completing inspection clears it.  The needed-history
//! records the *rising edge* only, so a burst of requests against an
//! already-flagged asset produces exactly one response-time measurement.

use patrol_core::{EdgeId, NodeId, Tick};

// ── EntityRef ─────────────────────────────────────────────────────────────────

/// Reference to one inspectable asset, node or edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityRef {
    Node(NodeId),
    Edge(EdgeId),
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityRef::Node(n) => write!(f, "{n}"),
            EntityRef::Edge(e) => write!(f, "{e}"),
        }
    }
}

// ── InspectionLog ─────────────────────────────────────────────────────────────

/// Inspection history plus the pending-inspection flag for one asset.
#[derive(Debug, Clone, Default)]
pub struct InspectionLog {
    needs_inspection: bool,
    /// Completed inspections, ascending.  Append-only.
    inspections: Vec<Tick>,
    /// Ticks at which the asset *became* needed (rising edges only), ascending.
    needed: Vec<Tick>,
}

impl InspectionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed inspection at `t` and clear the pending flag.
    pub fn add_inspection(&mut self, t: Tick) {
        debug_assert!(self.inspections.last().is_none_or(|&last| last <= t));
        self.needs_inspection = false;
        self.inspections.push(t);
    }

    /// Raise the pending flag.  Records `t` in the needed-history only on the
    /// false→true transition.
    pub fn mark_needed(&mut self, t: Tick) {
        if !self.needs_inspection {
            self.needs_inspection = true;
            self.needed.push(t);
        }
    }

    #[inline]
    pub fn needs_inspection(&self) -> bool {
        self.needs_inspection
    }

    /// Latest recorded inspection time ≤ `t`, or `Tick::ZERO` if none.
    pub fn last_inspection_time_at(&self, t: Tick) -> Tick {
        let idx = self.inspections.partition_point(|&i| i <= t);
        if idx == 0 {
            Tick::ZERO
        } else {
            self.inspections[idx - 1]
        }
    }

    /// Earliest recorded inspection time ≥ `t`, or `None` if the asset was
    /// never inspected at or after `t`.
    pub fn next_inspection_time_at(&self, t: Tick) -> Option<Tick> {
        let idx = self.inspections.partition_point(|&i| i < t);
        self.inspections.get(idx).copied()
    }

    /// All completed inspection times, ascending.
    pub fn inspection_times(&self) -> &[Tick] {
        &self.inspections
    }

    /// All rising-edge needed times, ascending.
    pub fn needed_times(&self) -> &[Tick] {
        &self.needed
    }
}

// ── Inspectable ───────────────────────────────────────────────────────────────

/// Capability shared by every asset that needs periodic inspection.
///
/// Implementors only provide the accessors; the history operations are
/// forwarded to the embedded [`InspectionLog`].
pub trait Inspectable {
    fn log(&self) -> &InspectionLog;
    fn log_mut(&mut self) -> &mut InspectionLog;

    /// Dwell ticks an agent must spend to complete one inspection.
    fn time_to_inspect(&self) -> u64;

    /// Relative risk weight of this asset (≥ 0).
    fn risk_multiplier(&self) -> f64;

    // ── Provided forwards ─────────────────────────────────────────────────

    fn needs_inspection(&self) -> bool {
        self.log().needs_inspection()
    }

    fn record_inspection(&mut self, t: Tick) {
        self.log_mut().add_inspection(t);
    }

    fn mark_needed(&mut self, t: Tick) {
        self.log_mut().mark_needed(t);
    }

    fn last_inspection_time_at(&self, t: Tick) -> Tick {
        self.log().last_inspection_time_at(t)
    }

    fn next_inspection_time_at(&self, t: Tick) -> Option<Tick> {
        self.log().next_inspection_time_at(t)
    }
}
