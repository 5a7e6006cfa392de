//! Pheromone-weighted probabilistic navigation (ACO-style).
//!
//! Each candidate edge gets weight
//!
//!   heuristic(edge)^beta × (1 + (1 / (pheromone + 1))²)^alpha
//!
//! The pheromone factor decays toward 1 as an edge accumulates recent
//! inspections, so heavily serviced edges lose attraction while the heuristic
//! keeps pulling toward stale ones.  Weights are normalized into a
//! distribution and sampled; if floating-point rounding pushes the draw past
//! the cumulative sum, the last candidate wins.
//!
//! `alpha`/`beta` are per-instance configuration.  The defaults were tuned by
//! parameter sweep on survey networks.

use serde::{Deserialize, Serialize};

use patrol_core::{AgentRng, EdgeId, NodeId, Tick};
use patrol_net::InspectionNetwork;

use crate::location::EdgeNodeLocation;
use crate::strategy::{random_start, NavCtx, NavStrategy};
use crate::{NavError, NavResult};

pub const DEFAULT_ALPHA: f64 = 12.64;
pub const DEFAULT_BETA: f64 = 9.78;

// ── Heuristic ─────────────────────────────────────────────────────────────────

/// Staleness heuristic feeding the edge weight.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcoHeuristic {
    /// Own staleness only: `(now − lit)^beta`.
    Lni,
    /// Own staleness plus the stalest neighbour at the far endpoint:
    /// `((now − lit) + max_neighbour_staleness)^beta`.
    LniNeighbour,
}

impl AcoHeuristic {
    fn value(
        self,
        net: &InspectionNetwork,
        now: Tick,
        edge: EdgeId,
        from: NodeId,
        beta: f64,
    ) -> f64 {
        let staleness = |e: EdgeId| now.0.saturating_sub(net.edge(e).lit(now).0) as f64;
        let base = match self {
            AcoHeuristic::Lni => staleness(edge),
            AcoHeuristic::LniNeighbour => {
                let far = net.other_end(edge, from).ok();
                let neighbour_max = far
                    .map(|n| {
                        net.out_edges(n)
                            .iter()
                            .filter(|&&e| e != edge)
                            .map(|&e| staleness(e))
                            .fold(0.0, f64::max)
                    })
                    .unwrap_or(0.0);
                staleness(edge) + neighbour_max
            }
        };
        base.powf(beta)
    }
}

// ── AcoNav ────────────────────────────────────────────────────────────────────

pub struct AcoNav {
    alpha: f64,
    beta: f64,
    heuristic: AcoHeuristic,
}

impl AcoNav {
    pub fn new(alpha: f64, beta: f64, heuristic: AcoHeuristic) -> Self {
        Self { alpha, beta, heuristic }
    }

    fn weight(&self, net: &InspectionNetwork, now: Tick, edge: EdgeId, from: NodeId) -> f64 {
        let h = self.heuristic.value(net, now, edge, from, self.beta);
        // Clamp so a deeply decayed (negative) pheromone cannot zero the
        // denominator or flip the factor's sign.
        let p = (net.edge(edge).pheromone + 1).max(1) as f64;
        let trail = 1.0 + (1.0 / p).powi(2);
        h * trail.powf(self.alpha)
    }
}

impl NavStrategy for AcoNav {
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
        let candidates = ctx.net.out_edges(current);
        let last = *candidates.last().ok_or(NavError::DeadEnd(current))?;

        let weights: Vec<f64> = candidates
            .iter()
            .map(|&e| self.weight(ctx.net, ctx.now, e, current))
            .collect();
        let total: f64 = weights.iter().sum();

        // Degenerate distribution (everything freshly inspected, or numeric
        // underflow): fall through to the last candidate.
        let edge = if total <= 0.0 || !total.is_finite() {
            last
        } else {
            let draw = ctx.rng.gen_range(0.0..total);
            let mut cumulative = 0.0;
            let mut picked = last;
            for (&e, &w) in candidates.iter().zip(&weights) {
                cumulative += w;
                if draw < cumulative {
                    picked = e;
                    break;
                }
            }
            picked
        };

        let node = ctx.net.other_end(edge, current)?;
        EdgeNodeLocation::new(ctx.net, edge, node)
    }
}
