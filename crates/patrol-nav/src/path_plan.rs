//! Battery-aware multi-hop path planning.
//!
//! Instead of choosing one edge at a time, enumerate every simple path from
//! the current node to a recharge-capable node whose total length fits in
//! `0.9 ×` the agent's full-battery flight range, score whole paths by
//! staleness, and commit to the best one.  The agent replans only when the
//! committed path is exhausted — or aborted because another agent started
//! inspecting one of its edges first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use patrol_core::{AgentRng, EdgeId, NodeId, Tick};
use patrol_net::{Inspectable, InspectionNetwork};

use crate::location::EdgeNodeLocation;
use crate::strategy::{random_start, NavCtx, NavStrategy};
use crate::{NavError, NavResult};

/// Fraction of full flight range a committed path may consume.  The reserve
/// absorbs dwell time and dispatch detours mid-path.
const RANGE_SAFETY: f64 = 0.9;

// ── Scoring ───────────────────────────────────────────────────────────────────

/// How candidate paths are ranked.  All variants prefer stale paths.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathScoring {
    /// Maximize the minimum staleness over the path; paths containing an
    /// actively inspected edge are skipped (second pass if all are).
    MinStale,
    /// Maximize the mean squared staleness; same active-edge skipping.
    SumSquares,
    /// Maximize minimum *completed* staleness, ignoring active inspections
    /// entirely.
    MinStaleStrict,
}

impl PathScoring {
    fn ignores_activity(self) -> bool {
        matches!(self, PathScoring::MinStaleStrict)
    }

    fn score(self, net: &InspectionNetwork, now: Tick, edges: &[EdgeId]) -> f64 {
        match self {
            PathScoring::MinStale => edges
                .iter()
                .map(|&e| now.0.saturating_sub(net.edge(e).lit(now).0) as f64)
                .fold(f64::INFINITY, f64::min),
            PathScoring::SumSquares => {
                let sum: f64 = edges
                    .iter()
                    .map(|&e| {
                        let s = now.0.saturating_sub(net.edge(e).lit(now).0) as f64;
                        s * s
                    })
                    .sum();
                sum / edges.len() as f64
            }
            PathScoring::MinStaleStrict => edges
                .iter()
                .map(|&e| {
                    now.0
                        .saturating_sub(net.edge(e).last_inspection_time_at(now).0)
                        as f64
                })
                .fold(f64::INFINITY, f64::min),
        }
    }
}

// ── Path enumeration ──────────────────────────────────────────────────────────

/// All simple paths (as edge sequences) from `start` to any recharge node,
/// with total length ≤ `budget`.  Depth-first with an explicit stack.
fn recharge_paths(
    net: &InspectionNetwork,
    start: NodeId,
    budget: f64,
) -> Vec<Vec<EdgeId>> {
    struct Frame {
        node: NodeId,
        next_edge: usize,
    }

    let mut paths = Vec::new();
    let mut stack = vec![Frame { node: start, next_edge: 0 }];
    let mut path_edges: Vec<EdgeId> = Vec::new();
    let mut visited = vec![false; net.node_count()];
    visited[start.index()] = true;
    let mut length = 0.0;

    while let Some(frame) = stack.last_mut() {
        let node = frame.node;
        let Some(&edge) = net.out_edges(node).get(frame.next_edge) else {
            // Exhausted this node: backtrack.
            stack.pop();
            visited[node.index()] = false;
            if let Some(e) = path_edges.pop() {
                length -= net.edge(e).length;
            }
            continue;
        };
        frame.next_edge += 1;

        let Ok(next) = net.other_end(edge, node) else {
            continue;
        };
        if visited[next.index()] {
            continue;
        }
        let edge_len = net.edge(edge).length;
        if length + edge_len > budget {
            continue;
        }

        path_edges.push(edge);
        length += edge_len;
        if net.node(next).recharge {
            paths.push(path_edges.clone());
        }
        visited[next.index()] = true;
        stack.push(Frame { node: next, next_edge: 0 });
    }

    paths
}

// ── PathPlanNav ───────────────────────────────────────────────────────────────

pub struct PathPlanNav {
    scoring: PathScoring,
    committed: VecDeque<EdgeNodeLocation>,
}

impl PathPlanNav {
    pub fn new(scoring: PathScoring) -> Self {
        Self {
            scoring,
            committed: VecDeque::new(),
        }
    }

    fn replan(&mut self, ctx: &mut NavCtx<'_>, current: NodeId) -> NavResult<()> {
        let budget = RANGE_SAFETY * ctx.max_flight_distance;
        let candidates = recharge_paths(ctx.net, current, budget);
        if candidates.is_empty() {
            return Err(NavError::NoRechargeReachable(current));
        }

        // First pass skips paths crossing someone else's active inspection;
        // if that eliminates everything, take them anyway.
        let best = self
            .pick(ctx, &candidates, true)
            .or_else(|| self.pick(ctx, &candidates, false))
            .ok_or(NavError::NoRechargeReachable(current))?;

        // Convert the edge sequence into legs.
        let mut node = current;
        self.committed.clear();
        for &edge in best {
            node = ctx.net.other_end(edge, node)?;
            self.committed
                .push_back(EdgeNodeLocation::new(ctx.net, edge, node)?);
        }
        Ok(())
    }

    fn pick<'p>(
        &self,
        ctx: &NavCtx<'_>,
        candidates: &'p [Vec<EdgeId>],
        skip_active: bool,
    ) -> Option<&'p Vec<EdgeId>> {
        let skip_active = skip_active && !self.scoring.ignores_activity();
        candidates
            .iter()
            .filter(|path| {
                !skip_active
                    || path
                        .iter()
                        .all(|&e| !ctx.net.edge(e).is_under_inspection())
            })
            .max_by(|x, y| {
                let sx = self.scoring.score(ctx.net, ctx.now, x);
                let sy = self.scoring.score(ctx.net, ctx.now, y);
                sx.total_cmp(&sy).then_with(|| y.cmp(x)) // shorter/lower path wins ties
            })
    }
}

impl NavStrategy for PathPlanNav {
    fn start_location(
        &mut self,
        net: &InspectionNetwork,
        rng: &mut AgentRng,
    ) -> NavResult<NodeId> {
        // Prefer a recharge node so the first plan starts fully charged.
        let recharge: Vec<NodeId> = (0..net.node_count() as u32)
            .map(NodeId)
            .filter(|&n| net.node(n).recharge)
            .collect();
        match rng.choose(&recharge) {
            Some(&n) => Ok(n),
            None => random_start(net, rng),
        }
    }

    fn next_destination(
        &mut self,
        ctx: &mut NavCtx<'_>,
        current: NodeId,
    ) -> NavResult<EdgeNodeLocation> {
        // Abort a committed plan if a peer claimed one of its edges.
        if !self.scoring.ignores_activity()
            && self
                .committed
                .iter()
                .any(|leg| {
                    leg.edge
                        .is_some_and(|e| ctx.net.edge(e).is_under_inspection())
                })
        {
            self.committed.clear();
        }
        if self.committed.is_empty() {
            self.replan(ctx, current)?;
        }
        self.committed
            .pop_front()
            .ok_or(NavError::NoRechargeReachable(current))
    }
}
