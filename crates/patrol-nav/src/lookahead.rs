//! Second-order LNI: score a candidate edge together with what lies beyond it.
//!
//! Plain greedy LNI happily flies onto a stale spur whose far side was just
//! inspected, then has to double back.  The lookahead variant adds the far
//! side's staleness to the score: from the candidate's far endpoint it walks
//! forward through degree-2 chain nodes (where there is only one way onward)
//! and takes the *most recent* inspection time seen on that chain.
//!
//! Scores are minimized, so old-on-both-sides candidates win.  The rooted
//! variant square-root-damps both terms, which favors extremely stale edges
//! more aggressively than moderately stale pairs.

use patrol_core::{AgentRng, EdgeId, NodeId, Tick};
use patrol_net::InspectionNetwork;

use crate::location::EdgeNodeLocation;
use crate::strategy::{random_start, NavCtx, NavStrategy};
use crate::{NavError, NavResult};

pub struct Lookahead {
    /// Square-root damping of both score terms.
    rooted: bool,
}

impl Lookahead {
    pub fn new(rooted: bool) -> Self {
        Self { rooted }
    }

    fn score(&self, net: &InspectionNetwork, now: Tick, edge: EdgeId, from: NodeId) -> f64 {
        let own = net.edge(edge).lit(now).0 as f64;
        let far = chain_freshest(net, now, edge, from).0 as f64;
        if self.rooted {
            own.sqrt() + far.sqrt()
        } else {
            own + far
        }
    }
}

/// Most recent inspection time on the chain continuing past `edge`'s far
/// endpoint through degree-2 nodes.  `Tick::ZERO` if the chain ends
/// immediately or was never inspected.
fn chain_freshest(
    net: &InspectionNetwork,
    now: Tick,
    edge: EdgeId,
    from: NodeId,
) -> Tick {
    let mut freshest = Tick::ZERO;
    let mut prev_edge = edge;
    let mut node = match net.other_end(edge, from) {
        Ok(n) => n,
        Err(_) => return freshest,
    };
    // Bounded by edge count so a cyclic chain cannot loop forever.
    for _ in 0..net.edge_count() {
        if net.degree(node) != 2 {
            break;
        }
        let Some(&next_edge) = net
            .out_edges(node)
            .iter()
            .find(|&&e| e != prev_edge)
        else {
            break;
        };
        let lit = net.edge(next_edge).lit(now);
        if lit > freshest {
            freshest = lit;
        }
        node = match net.other_end(next_edge, node) {
            Ok(n) => n,
            Err(_) => break,
        };
        prev_edge = next_edge;
    }
    freshest
}

impl NavStrategy for Lookahead {
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
        let edge = ctx
            .net
            .out_edges(current)
            .iter()
            .copied()
            .min_by(|&x, &y| {
                let sx = self.score(ctx.net, ctx.now, x, current);
                let sy = self.score(ctx.net, ctx.now, y, current);
                sx.total_cmp(&sy).then_with(|| x.cmp(&y))
            })
            .ok_or(NavError::DeadEnd(current))?;
        let node = ctx.net.other_end(edge, current)?;
        EdgeNodeLocation::new(ctx.net, edge, node)
    }
}
