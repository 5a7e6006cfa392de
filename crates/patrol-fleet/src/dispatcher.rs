//! Fleet ownership, the tick loop, and nearest-agent dispatch.
//!
//! On-demand inspection requests are served by whichever eligible agent can
//! reach the target cheapest, measured from the node the agent is currently
//! heading to.  The winning agent is handed a forced path; whether it takes
//! the detour is the strategy's call.

use patrol_core::{AgentId, EdgeId, NodeId, Point2, SimRng, Tick};
use patrol_nav::{EdgeNodeLocation, Job, NavStrategy};
use patrol_net::{dijkstra, EntityRef, InspectionNetwork};

use crate::uav::{StepEffect, Uav, UavConfig};
use crate::{FleetError, FleetResult};

// ── Dispatcher ────────────────────────────────────────────────────────────────

pub struct Dispatcher {
    uavs: Vec<Uav>,
    config: UavConfig,
    seed: u64,
    /// Percentage of the cycle a fleet lap is expected to cover; 0 until set.
    cycle_target_percentage: f64,
}

impl Dispatcher {
    pub fn new(config: UavConfig, seed: u64) -> Self {
        Self {
            uavs: Vec::new(),
            config,
            seed,
            cycle_target_percentage: 0.0,
        }
    }

    // ── Fleet management ──────────────────────────────────────────────────

    /// Add an agent placed by its strategy's own start preference.
    pub fn add_uav(
        &mut self,
        strategy: Box<dyn NavStrategy>,
        net: &InspectionNetwork,
        starts_at: Tick,
    ) -> FleetResult<AgentId> {
        let id = AgentId(self.uavs.len() as u32);
        let uav = Uav::spawn(id, self.config.clone(), strategy, net, self.seed, starts_at)?;
        self.uavs.push(uav);
        Ok(id)
    }

    /// Add an agent at an explicit start node.
    pub fn add_uav_at(
        &mut self,
        strategy: Box<dyn NavStrategy>,
        net: &InspectionNetwork,
        starts_at: Tick,
        start: NodeId,
    ) -> AgentId {
        let id = AgentId(self.uavs.len() as u32);
        let uav =
            Uav::spawn_at(id, self.config.clone(), strategy, net, self.seed, starts_at, start);
        self.uavs.push(uav);
        id
    }

    pub fn len(&self) -> usize {
        self.uavs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uavs.is_empty()
    }

    pub fn clear(&mut self) {
        self.uavs.clear();
    }

    pub fn uav(&self, id: AgentId) -> FleetResult<&Uav> {
        self.uavs
            .get(id.index())
            .ok_or(FleetError::AgentNotFound(id))
    }

    pub fn uav_mut(&mut self, id: AgentId) -> FleetResult<&mut Uav> {
        self.uavs
            .get_mut(id.index())
            .ok_or(FleetError::AgentNotFound(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Uav> {
        self.uavs.iter()
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Step every agent once, in id order, relaying each agent's broadcasts
    /// to peers in radio range before the next agent moves.
    pub fn step_all(
        &mut self,
        net: &mut InspectionNetwork,
        now: Tick,
        in_flight_window: bool,
    ) -> FleetResult<()> {
        for i in 0..self.uavs.len() {
            let effects = self.uavs[i].step(net, now, in_flight_window)?;
            for effect in effects {
                let StepEffect::Announce { from, origin, entity, t } = effect;
                self.send_inspection_message(origin, entity, t, Some(from));
            }
        }
        Ok(())
    }

    /// Deliver an inspection broadcast to every agent in radio range of
    /// `origin`, except `exclude` (the sender).
    pub fn send_inspection_message(
        &mut self,
        origin: Point2,
        entity: EntityRef,
        t: Tick,
        exclude: Option<AgentId>,
    ) {
        for uav in &mut self.uavs {
            if Some(uav.id()) == exclude {
                continue;
            }
            if uav.pos().distance(origin) <= uav.broadcast_radius() {
                uav.observe_inspection(entity, t);
            }
        }
    }

    // ── On-demand dispatch ────────────────────────────────────────────────

    /// Dispatch the best-placed agent to inspect `edge`.
    ///
    /// Returns `true` if the request is covered: either the edge is already
    /// under inspection (no agent is moved) or an agent accepted a forced
    /// path ending with a traversal of the edge.
    pub fn inspection_requested_edge(
        &mut self,
        net: &InspectionNetwork,
        edge: EdgeId,
    ) -> FleetResult<bool> {
        if net.edge(edge).is_under_inspection() {
            return Ok(true);
        }
        let e = net.edge(edge);
        let (end_a, end_b) = (e.a, e.b);
        let dist_a = dijkstra::shortest_distances(net, end_a);
        let dist_b = dijkstra::shortest_distances(net, end_b);

        // Best (cost, endpoint, agent) over both approach directions.
        let mut best: Option<(f64, NodeId, usize)> = None;
        for (i, uav) in self.uavs.iter().enumerate() {
            if !Self::eligible(uav) {
                continue;
            }
            let from = uav.destination_node();
            for (endpoint, dist) in [(end_a, &dist_a), (end_b, &dist_b)] {
                let cost = dist[from.index()];
                if cost.is_finite() && best.is_none_or(|(c, _, _)| cost < c) {
                    best = Some((cost, endpoint, i));
                }
            }
        }
        let Some((_, endpoint, i)) = best else {
            return Ok(false);
        };

        let from = self.uavs[i].destination_node();
        let Some(mut legs) = Self::legs_between(net, from, endpoint) else {
            return Ok(false);
        };
        // Final leg: traverse the requested edge to its far side.
        let far = net.other_end(edge, endpoint)?;
        legs.push(EdgeNodeLocation::new(net, edge, far)?);
        Ok(self.uavs[i].offer_forced_path(net, legs))
    }

    /// Dispatch the best-placed agent to inspect `node`.
    pub fn inspection_requested_node(
        &mut self,
        net: &InspectionNetwork,
        node: NodeId,
    ) -> FleetResult<bool> {
        let dist = dijkstra::shortest_distances(net, node);

        let mut best: Option<(f64, usize)> = None;
        for (i, uav) in self.uavs.iter().enumerate() {
            if !Self::eligible(uav) {
                continue;
            }
            let cost = dist[uav.destination_node().index()];
            // An agent already heading to the node has nothing to be
            // forced onto.
            if cost == 0.0 {
                continue;
            }
            if cost.is_finite() && best.is_none_or(|(c, _)| cost < c) {
                best = Some((cost, i));
            }
        }
        let Some((_, i)) = best else {
            return Ok(false);
        };

        let from = self.uavs[i].destination_node();
        let Some(legs) = Self::legs_between(net, from, node) else {
            return Ok(false);
        };
        Ok(self.uavs[i].offer_forced_path(net, legs))
    }

    /// Edge-by-edge legs along the shortest path from `from` to `to`,
    /// excluding the starting node itself.
    fn legs_between(
        net: &InspectionNetwork,
        from: NodeId,
        to: NodeId,
    ) -> Option<Vec<EdgeNodeLocation>> {
        let path = dijkstra::shortest_path(net, from, to)?;
        let mut legs = Vec::with_capacity(path.len().saturating_sub(1));
        for pair in path.windows(2) {
            let edge = net.edge_between(pair[0], pair[1])?;
            legs.push(EdgeNodeLocation { edge: Some(edge), node: pair[1] });
        }
        Some(legs)
    }

    fn eligible(uav: &Uav) -> bool {
        !uav.has_crashed() && uav.job() != Job::InspectingOnCommand
    }

    // ── Failures and stats ────────────────────────────────────────────────

    /// A uniformly random non-crashed agent, for failure injection.
    pub fn random_active_uav(&self, rng: &mut SimRng) -> FleetResult<AgentId> {
        let active: Vec<AgentId> = self
            .uavs
            .iter()
            .filter(|u| !u.has_crashed())
            .map(|u| u.id())
            .collect();
        rng.choose(&active).copied().ok_or(FleetError::AllCrashed)
    }

    /// Crash `id` for `downtime` ticks.  Rearms if already crashed.
    pub fn force_crash(
        &mut self,
        net: &mut InspectionNetwork,
        id: AgentId,
        downtime: u64,
    ) -> FleetResult<()> {
        self.uav_mut(id)?.crash_for(net, downtime);
        Ok(())
    }

    /// Mean accumulated standby ticks across the fleet.
    pub fn average_standby_time(&self) -> f64 {
        if self.uavs.is_empty() {
            return 0.0;
        }
        let total: u64 = self.uavs.iter().map(Uav::total_standby).sum();
        total as f64 / self.uavs.len() as f64
    }

    /// Lap length reported by the first agent that has measured one.
    pub fn steps_in_cycle(&self) -> Option<u64> {
        self.uavs.iter().find_map(Uav::steps_in_cycle)
    }

    pub fn cycle_target_percentage(&self) -> f64 {
        self.cycle_target_percentage
    }

    /// Set what share of the cycle the next lap is expected to cover.
    pub fn set_cycle_target_percentage(&mut self, percent: f64) -> FleetResult<()> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(FleetError::InvalidCycleTarget(percent));
        }
        self.cycle_target_percentage = percent;
        Ok(())
    }

    /// Steps of the next lap that must be completed to meet the target.
    /// `None` until a lap has been measured.
    pub fn steps_to_fulfill_cycle(&self) -> Option<u64> {
        self.steps_in_cycle()
            .map(|s| (s as f64 * self.cycle_target_percentage / 100.0) as u64 + 1)
    }
}
