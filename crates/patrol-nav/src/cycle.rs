//! Fixed-cycle navigation: follow a precomputed postman tour forever.

use std::sync::Arc;

use patrol_core::{AgentRng, NodeId, Tick};
use patrol_net::InspectionNetwork;

use crate::location::EdgeNodeLocation;
use crate::postman;
use crate::strategy::{NavCtx, NavStrategy};
use crate::{NavError, NavResult};

// ── CycleTour ─────────────────────────────────────────────────────────────────

/// A shared closed walk over the whole network.
///
/// Computed once per run and cloned cheaply into every cycle agent, so a
/// large fleet doesn't recompute (or re-store) the tour per agent.
#[derive(Clone, Debug)]
pub struct CycleTour {
    nodes: Arc<[NodeId]>,
}

impl CycleTour {
    /// Compute the tour from `start`.  See [`postman::closed_walk`].
    pub fn compute(net: &InspectionNetwork, start: NodeId) -> NavResult<Self> {
        let walk = postman::closed_walk(net, start)?;
        Ok(Self { nodes: walk.into() })
    }

    /// Number of legs in one lap (the closing node is not double-counted).
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }
}

// ── CycleNav ──────────────────────────────────────────────────────────────────

/// Follows the tour in fixed order, wrapping at the end.
///
/// `steps_in_cycle` is measured on the first completed lap and stays fixed
/// afterwards; the dispatcher uses it to stagger fleet starts.
pub struct CycleNav {
    tour: CycleTour,
    /// Index into the tour of the node the agent most recently targeted.
    position: usize,
    /// Tick of the previous wrap (departure toward the tour anchor).  One
    /// lap is exactly wrap-to-wrap.
    last_wrap: Option<Tick>,
    steps_in_cycle: Option<u64>,
}

impl CycleNav {
    /// `start_index` offsets this agent's entry point along the tour so a
    /// fleet spreads out instead of flying in convoy.
    pub fn new(tour: CycleTour, start_index: usize) -> NavResult<Self> {
        if tour.is_empty() {
            return Err(NavError::MissingTour);
        }
        let position = start_index % tour.len();
        Ok(Self {
            tour,
            position,
            last_wrap: None,
            steps_in_cycle: None,
        })
    }
}

impl NavStrategy for CycleNav {
    fn start_location(
        &mut self,
        _net: &InspectionNetwork,
        _rng: &mut AgentRng,
    ) -> NavResult<NodeId> {
        Ok(self.tour.nodes()[self.position])
    }

    fn next_destination(
        &mut self,
        ctx: &mut NavCtx<'_>,
        current: NodeId,
    ) -> NavResult<EdgeNodeLocation> {
        let lap_len = self.tour.len();
        // Re-anchor if the agent is not where the tour says (it may have been
        // placed elsewhere, or revived mid-plan).
        if self.tour.nodes()[self.position] != current {
            if let Some(pos) = self.tour.nodes()[..lap_len]
                .iter()
                .position(|&n| n == current)
            {
                self.position = pos;
            }
        }

        let next_index = (self.position + 1) % lap_len;
        if next_index == 0 {
            // Departing toward the anchor again — the first full wrap-to-wrap
            // interval fixes the lap length.
            if let (None, Some(prev)) = (self.steps_in_cycle, self.last_wrap) {
                self.steps_in_cycle = Some(ctx.now.since(prev));
            }
            self.last_wrap = Some(ctx.now);
        }

        let next = self.tour.nodes()[next_index];
        self.position = next_index;
        let edge = ctx
            .net
            .edge_between(current, next)
            .ok_or(NavError::DeadEnd(current))?;
        EdgeNodeLocation::new(ctx.net, edge, next)
    }

    fn steps_in_cycle(&self) -> Option<u64> {
        self.steps_in_cycle
    }
}
