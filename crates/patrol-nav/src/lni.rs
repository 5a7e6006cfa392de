//! Longest-Not-Inspected (LNI) strategies.
//!
//! The greedy core is the same everywhere: among the edges at the current
//! node, fly the one whose last inspection is oldest.  The variants differ in
//! *whose* knowledge feeds the staleness estimate:
//!
//! - [`GreedyLni`] reads the network's ground truth (a central server view);
//!   the coordinated flavor additionally serves dispatcher-forced detours.
//! - [`InterUavLni`] keeps a private staleness map, updated by its own visits
//!   and by broadcasts from peers within radio range.
//! - [`IndividualLni`] keeps the same private map but never hears peers —
//!   the no-communication baseline.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use patrol_core::{AgentRng, EdgeId, NodeId, Tick};
use patrol_net::{EntityRef, Inspectable, InspectionNetwork};

use crate::location::EdgeNodeLocation;
use crate::strategy::{random_start, Job, NavCtx, NavStrategy};
use crate::{NavError, NavResult};

// ── Greedy core ───────────────────────────────────────────────────────────────

/// Pick the stalest edge at `current` by ground truth: oldest in-progress
/// start first, oldest completed inspection as tie-break, edge id last for
/// determinism.
pub(crate) fn stalest_edge(
    net: &InspectionNetwork,
    now: Tick,
    current: NodeId,
) -> NavResult<EdgeId> {
    net.out_edges(current)
        .iter()
        .copied()
        .min_by_key(|&id| {
            let e = net.edge(id);
            let start = e.last_inspection_start().unwrap_or(Tick::ZERO);
            let completed = e.last_inspection_time_at(now);
            (start, completed, id)
        })
        .ok_or(NavError::DeadEnd(current))
}

// ── GreedyLni ─────────────────────────────────────────────────────────────────

/// Central-server LNI: greedy over the network's real inspection history.
pub struct GreedyLni {
    /// Whether this agent serves dispatcher-forced detours.
    coordinated: bool,
    forced: VecDeque<EdgeNodeLocation>,
    job: Job,
}

impl GreedyLni {
    pub fn new(coordinated: bool) -> Self {
        Self {
            coordinated,
            forced: VecDeque::new(),
            job: Job::Monitoring,
        }
    }
}

impl NavStrategy for GreedyLni {
    fn start_location(
        &mut self,
        net: &InspectionNetwork,
        rng: &mut AgentRng,
    ) -> NavResult<NodeId> {
        random_start(net, rng)
    }

    fn next_destination(
        &mut self,
        ctx: &mut NavCtx<'_>,
        current: NodeId,
    ) -> NavResult<EdgeNodeLocation> {
        if let Some(leg) = self.forced.pop_front() {
            if self.forced.is_empty() {
                self.job = Job::Monitoring;
            }
            return Ok(leg);
        }
        let edge = stalest_edge(ctx.net, ctx.now, current)?;
        let node = ctx.net.other_end(edge, current)?;
        EdgeNodeLocation::new(ctx.net, edge, node)
    }

    fn accept_forced_path(
        &mut self,
        net: &InspectionNetwork,
        current: Option<&EdgeNodeLocation>,
        path: Vec<EdgeNodeLocation>,
    ) -> bool {
        if !self.coordinated || path.is_empty() {
            return false;
        }
        // The first forced leg must depart from where this agent is headed,
        // otherwise the detour is not flyable and must be rejected.
        if let (Some(cur), Some(first)) = (current, path.first()) {
            let connected = match first.edge {
                Some(edge) => net
                    .other_end(edge, first.node)
                    .is_ok_and(|far| far == cur.node),
                None => first.node == cur.node,
            };
            if !connected {
                return false;
            }
        }
        self.forced = path.into();
        self.job = Job::InspectingOnCommand;
        true
    }

    fn current_job(&self) -> Job {
        self.job
    }
}

// ── Knowledge-map LNI ─────────────────────────────────────────────────────────

/// LNI over a private staleness map instead of network ground truth.
///
/// Unknown edges score `Tick::ZERO` (never inspected, maximally attractive).
struct KnownLni {
    knowledge: FxHashMap<EdgeId, Tick>,
}

impl KnownLni {
    fn new() -> Self {
        Self {
            knowledge: FxHashMap::default(),
        }
    }

    fn pick(
        &mut self,
        ctx: &mut NavCtx<'_>,
        current: NodeId,
    ) -> NavResult<EdgeNodeLocation> {
        let edge = ctx
            .net
            .out_edges(current)
            .iter()
            .copied()
            .min_by_key(|&id| {
                let known = self.knowledge.get(&id).copied().unwrap_or(Tick::ZERO);
                (known, id)
            })
            .ok_or(NavError::DeadEnd(current))?;
        // The agent is about to fly this edge: note it as fresh now so the
        // next decision doesn't bounce straight back.
        self.knowledge.insert(edge, ctx.now);
        let node = ctx.net.other_end(edge, current)?;
        EdgeNodeLocation::new(ctx.net, edge, node)
    }

    fn learn(&mut self, entity: EntityRef, t: Tick) {
        if let EntityRef::Edge(edge) = entity {
            let known = self.knowledge.entry(edge).or_insert(Tick::ZERO);
            if t > *known {
                *known = t;
            }
        }
    }
}

/// LNI with peer broadcasts: announces its own inspections and folds peers'
/// announcements into its staleness map.
pub struct InterUavLni {
    inner: KnownLni,
}

impl InterUavLni {
    pub fn new() -> Self {
        Self { inner: KnownLni::new() }
    }
}

impl Default for InterUavLni {
    fn default() -> Self {
        Self::new()
    }
}

impl NavStrategy for InterUavLni {
    fn start_location(
        &mut self,
        net: &InspectionNetwork,
        rng: &mut AgentRng,
    ) -> NavResult<NodeId> {
        random_start(net, rng)
    }

    fn next_destination(
        &mut self,
        ctx: &mut NavCtx<'_>,
        current: NodeId,
    ) -> NavResult<EdgeNodeLocation> {
        self.inner.pick(ctx, current)
    }

    fn observe_inspection(&mut self, entity: EntityRef, t: Tick) {
        self.inner.learn(entity, t);
    }

    fn announces(&self) -> bool {
        true
    }
}

/// Silent LNI: private staleness map, no broadcasts in or out.
pub struct IndividualLni {
    inner: KnownLni,
}

impl IndividualLni {
    pub fn new() -> Self {
        Self { inner: KnownLni::new() }
    }
}

impl Default for IndividualLni {
    fn default() -> Self {
        Self::new()
    }
}

impl NavStrategy for IndividualLni {
    fn start_location(
        &mut self,
        net: &InspectionNetwork,
        rng: &mut AgentRng,
    ) -> NavResult<NodeId> {
        random_start(net, rng)
    }

    fn next_destination(
        &mut self,
        ctx: &mut NavCtx<'_>,
        current: NodeId,
    ) -> NavResult<EdgeNodeLocation> {
        self.inner.pick(ctx, current)
    }
}
