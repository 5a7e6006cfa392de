//! The `NavStrategy` trait — the decision seam every routing policy implements.

use patrol_core::{AgentRng, NodeId, Tick};
use patrol_net::{EntityRef, InspectionNetwork};

use crate::location::EdgeNodeLocation;
use crate::{NavError, NavResult};

// ── Job ───────────────────────────────────────────────────────────────────────

/// What an agent is currently working on, as seen by the dispatcher.
///
/// Agents in `InspectingOnCommand` are serving a forced detour and are not
/// eligible for further dispatch until they resume monitoring.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Job {
    Monitoring,
    InspectingOnCommand,
}

// ── NavCtx ────────────────────────────────────────────────────────────────────

/// Everything a strategy may consult when picking the next destination.
pub struct NavCtx<'a> {
    pub net: &'a InspectionNetwork,
    pub now: Tick,
    pub rng: &'a mut AgentRng,
    /// The owning agent's maximum flight distance on a full battery, in
    /// survey units.  Path-planning strategies budget against this.
    pub max_flight_distance: f64,
}

// ── NavStrategy ───────────────────────────────────────────────────────────────

/// Pluggable routing policy: "given the current node, pick the next leg".
///
/// Only [`next_destination`][Self::next_destination] and
/// [`start_location`][Self::start_location] are required; the coordination
/// hooks default to "not participating".
///
/// Strategies are owned by exactly one agent and called from the
/// single-threaded tick loop, so they may carry mutable per-agent state
/// (forced-path queues, staleness knowledge, committed plans) directly.
pub trait NavStrategy {
    /// Pick the node this agent starts the run at.
    fn start_location(
        &mut self,
        net: &InspectionNetwork,
        rng: &mut AgentRng,
    ) -> NavResult<NodeId>;

    /// Pick the next leg from `current`.
    ///
    /// A node with no incident edges is a fatal [`NavError::DeadEnd`].
    fn next_destination(
        &mut self,
        ctx: &mut NavCtx<'_>,
        current: NodeId,
    ) -> NavResult<EdgeNodeLocation>;

    /// Offer a dispatcher-forced detour.  `current` is the agent's present
    /// target.  Returns `true` if the strategy accepted and queued the path.
    ///
    /// Default: reject — the strategy does not serve on-demand requests.
    fn accept_forced_path(
        &mut self,
        _net: &InspectionNetwork,
        _current: Option<&EdgeNodeLocation>,
        _path: Vec<EdgeNodeLocation>,
    ) -> bool {
        false
    }

    /// Incorporate a broadcast "entity was inspected at `t`" observation.
    ///
    /// Default: ignore — the strategy keeps no staleness knowledge.
    fn observe_inspection(&mut self, _entity: EntityRef, _t: Tick) {}

    /// The agent's current job as seen by the dispatcher.
    fn current_job(&self) -> Job {
        Job::Monitoring
    }

    /// `true` if this strategy's inspections should be broadcast to peers.
    fn announces(&self) -> bool {
        false
    }

    /// Ticks one full lap takes, once known.  Only the cycle strategy
    /// reports this.
    fn steps_in_cycle(&self) -> Option<u64> {
        None
    }
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Uniformly random start node — the default placement for every strategy
/// that has no structural preference.
pub(crate) fn random_start(
    net: &InspectionNetwork,
    rng: &mut AgentRng,
) -> NavResult<NodeId> {
    if net.is_empty() {
        return Err(NavError::EmptyNetwork);
    }
    Ok(NodeId(rng.gen_range(0..net.node_count() as u32)))
}
