//! Uniform random walk — the lower-bound baseline every other strategy is
//! measured against.

use patrol_core::{AgentRng, NodeId};
use patrol_net::InspectionNetwork;

use crate::location::EdgeNodeLocation;
use crate::strategy::{random_start, NavCtx, NavStrategy};
use crate::{NavError, NavResult};

pub struct RandomNav;

impl NavStrategy for RandomNav {
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
        let edge = *ctx
            .rng
            .choose(ctx.net.out_edges(current))
            .ok_or(NavError::DeadEnd(current))?;
        let node = ctx.net.other_end(edge, current)?;
        EdgeNodeLocation::new(ctx.net, edge, node)
    }
}
