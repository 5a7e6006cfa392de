//! The per-agent state machine.
//!
//! # Tick priority
//!
//! Each tick an agent resolves exactly one of these, checked in order:
//!
//! 1. crashed           — crash countdown runs; revival consumes the tick
//! 2. flight window     — outside it nothing advances
//! 3. recharging        — on expiry the battery resets and the agent
//!                        proceeds this same tick
//! 4. standby           — consumes one tick, accumulates standby time
//! 5. active            — battery drain, movement, dwell, inspection
//!
//! Battery drain is unconditional in the active branch: an agent that runs
//! dry crashes on the spot, whatever else it was doing.

use patrol_core::{AgentId, AgentRng, NodeId, Point2, Tick};
use patrol_nav::{EdgeNodeLocation, Job, NavCtx, NavStrategy};
use patrol_net::{EntityRef, Inspectable, InspectionNetwork};
use serde::{Deserialize, Serialize};

use crate::countdown::{Countdown, CountdownState};
use crate::FleetResult;

/// Safety margin applied when judging whether the next leg is flyable on the
/// remaining battery.
const RANGE_SAFETY_MARGIN: f64 = 1.5;

// ── UavConfig ─────────────────────────────────────────────────────────────────

/// Static physical parameters shared by a fleet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UavConfig {
    /// Cruise speed in km/h.  One tick is one minute, so the per-tick travel
    /// distance is `speed_km_h / 60`.
    pub speed_km_h: f64,
    /// Full-battery endurance in ticks.
    pub battery_ticks: u64,
    /// Ticks a full recharge takes.
    pub recharge_ticks: u64,
    /// Radio range for inspection broadcasts, in survey units.
    pub broadcast_radius: f64,
}

impl UavConfig {
    /// Distance covered per tick, in survey units.
    #[inline]
    pub fn speed_per_tick(&self) -> f64 {
        self.speed_km_h / 60.0
    }

    /// Range on a full battery, in survey units.
    #[inline]
    pub fn max_flight_distance(&self) -> f64 {
        self.speed_per_tick() * self.battery_ticks as f64
    }
}

impl Default for UavConfig {
    fn default() -> Self {
        Self {
            speed_km_h: 60.0,
            battery_ticks: 480,
            recharge_ticks: 60,
            broadcast_radius: 300.0,
        }
    }
}

// ── Status / effects ──────────────────────────────────────────────────────────

/// Coarse agent status for snapshots and rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UavStatus {
    Active,
    Crashed,
    Recharging,
    Standby,
}

impl std::fmt::Display for UavStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UavStatus::Active => "active",
            UavStatus::Crashed => "crashed",
            UavStatus::Recharging => "recharging",
            UavStatus::Standby => "standby",
        };
        f.write_str(s)
    }
}

/// Side effect emitted by one agent's step, applied by the dispatcher after
/// the step returns (the strategy cannot reach the rest of the fleet while
/// its own agent is borrowed).
#[derive(Debug, Clone)]
pub enum StepEffect {
    /// Broadcast "entity inspected at `t`" to peers in radio range of `origin`.
    Announce {
        from: AgentId,
        origin: Point2,
        entity: EntityRef,
        t: Tick,
    },
}

// ── Uav ───────────────────────────────────────────────────────────────────────

pub struct Uav {
    id: AgentId,
    config: UavConfig,
    strategy: Box<dyn NavStrategy>,
    rng: AgentRng,

    pos: Point2,
    /// Node the agent last completed a cycle at.
    at_node: NodeId,
    destination: Option<EdgeNodeLocation>,

    battery: u64,
    crashed: bool,
    crash_countdown: Countdown,
    recharge_countdown: Countdown,

    standby_active: u64,
    standby_queued: u64,
    total_standby: u64,

    /// Dwell ticks spent at the current destination node.
    dwell: u64,
    /// The agent does nothing before this tick (staggered fleet entry).
    starts_at: Tick,
}

impl Uav {
    /// Create an agent and place it at its strategy's start location.
    pub fn spawn(
        id: AgentId,
        config: UavConfig,
        mut strategy: Box<dyn NavStrategy>,
        net: &InspectionNetwork,
        global_seed: u64,
        starts_at: Tick,
    ) -> FleetResult<Self> {
        let mut rng = AgentRng::new(global_seed, id);
        let start = strategy.start_location(net, &mut rng)?;
        Ok(Self::assemble(id, config, strategy, rng, net, start, starts_at))
    }

    /// Create an agent at an explicit start node, overriding the strategy's
    /// own start preference.
    pub fn spawn_at(
        id: AgentId,
        config: UavConfig,
        strategy: Box<dyn NavStrategy>,
        net: &InspectionNetwork,
        global_seed: u64,
        starts_at: Tick,
        start: NodeId,
    ) -> Self {
        let rng = AgentRng::new(global_seed, id);
        Self::assemble(id, config, strategy, rng, net, start, starts_at)
    }

    fn assemble(
        id: AgentId,
        config: UavConfig,
        strategy: Box<dyn NavStrategy>,
        rng: AgentRng,
        net: &InspectionNetwork,
        start: NodeId,
        starts_at: Tick,
    ) -> Self {
        Self {
            id,
            battery: config.battery_ticks,
            config,
            strategy,
            rng,
            pos: net.node(start).pos,
            at_node: start,
            destination: None,
            crashed: false,
            crash_countdown: Countdown::new(0),
            recharge_countdown: Countdown::new(0),
            standby_active: 0,
            standby_queued: 0,
            total_standby: 0,
            dwell: 0,
            starts_at,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn pos(&self) -> Point2 {
        self.pos
    }

    pub fn battery(&self) -> u64 {
        self.battery
    }

    pub fn has_crashed(&self) -> bool {
        self.crashed
    }

    pub fn is_recharging(&self) -> bool {
        self.recharge_countdown.is_running()
    }

    pub fn is_standby(&self) -> bool {
        self.standby_active > 0
    }

    pub fn total_standby(&self) -> u64 {
        self.total_standby
    }

    pub fn job(&self) -> Job {
        self.strategy.current_job()
    }

    pub fn steps_in_cycle(&self) -> Option<u64> {
        self.strategy.steps_in_cycle()
    }

    pub fn status(&self) -> UavStatus {
        if self.crashed {
            UavStatus::Crashed
        } else if self.is_recharging() {
            UavStatus::Recharging
        } else if self.is_standby() {
            UavStatus::Standby
        } else {
            UavStatus::Active
        }
    }

    /// Current target; the node the agent stands at when it has none.
    pub fn destination_node(&self) -> NodeId {
        self.destination.map_or(self.at_node, |d| d.node)
    }

    pub fn destination(&self) -> Option<&EdgeNodeLocation> {
        self.destination.as_ref()
    }

    pub fn broadcast_radius(&self) -> f64 {
        self.config.broadcast_radius
    }

    // ── Commands ──────────────────────────────────────────────────────────

    /// Crash indefinitely: halt the in-progress edge inspection but keep the
    /// destination so the plan resumes on revival.
    pub fn crash(&mut self, net: &mut InspectionNetwork) {
        self.crashed = true;
        self.recharge_countdown.reset();
        if let Some(dest) = self.destination {
            if let Some(edge) = dest.edge {
                net.edge_mut(edge).stop_inspection(self.id);
            }
        }
    }

    /// Crash with a revival countdown.  Calling again while already crashed
    /// rearms the countdown: last call wins.
    pub fn crash_for(&mut self, net: &mut InspectionNetwork, downtime: u64) {
        self.crash(net);
        self.crash_countdown.arm_for(downtime);
    }

    /// Queue standby time.  Extends, never shortens: the request lands on the
    /// active counter if idle, otherwise on the queued counter, and only if
    /// it is larger than what is already there.
    pub fn stand_by(&mut self, ticks: u64) {
        if self.standby_active > 0 {
            self.standby_queued = self.standby_queued.max(ticks);
        } else {
            self.standby_active = self.standby_active.max(ticks);
        }
    }

    /// Offer a dispatcher-forced path to this agent's strategy.
    pub fn offer_forced_path(
        &mut self,
        net: &InspectionNetwork,
        path: Vec<EdgeNodeLocation>,
    ) -> bool {
        let current = self
            .destination
            .unwrap_or_else(|| EdgeNodeLocation::hold(self.at_node));
        self.strategy.accept_forced_path(net, Some(&current), path)
    }

    /// Feed a broadcast observation to this agent's strategy.
    pub fn observe_inspection(&mut self, entity: EntityRef, t: Tick) {
        self.strategy.observe_inspection(entity, t);
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance one tick.  See the module docs for the priority ladder.
    pub fn step(
        &mut self,
        net: &mut InspectionNetwork,
        now: Tick,
        in_flight_window: bool,
    ) -> FleetResult<Vec<StepEffect>> {
        let mut effects = Vec::new();

        if now < self.starts_at {
            return Ok(effects);
        }

        // 1. Crashed: downtime elapses even outside the flight window.
        if self.crashed {
            if self.crash_countdown.tick() == CountdownState::Expired {
                // Revived; the revival tick itself is consumed.
                self.crashed = false;
            }
            return Ok(effects);
        }

        // 2. Outside the flight window nothing advances.
        if !in_flight_window {
            return Ok(effects);
        }

        // 3. Recharging.  Expiry resets the battery and falls through so the
        // agent acts on the same tick it finishes charging.
        if self.recharge_countdown.is_running() {
            match self.recharge_countdown.tick() {
                CountdownState::Expired => self.battery = self.config.battery_ticks,
                _ => return Ok(effects),
            }
        }

        // 4. Standby.
        if self.standby_active > 0 {
            self.standby_active -= 1;
            self.total_standby += 1;
            return Ok(effects);
        }

        // 5. Active.  Battery drains first, unconditionally.
        self.battery = self.battery.saturating_sub(1);
        if self.battery == 0 {
            self.crash(net);
            return Ok(effects);
        }

        // Queued standby ages one tick for every active tick; whatever is
        // left when the current cycle wraps up becomes active standby.
        if self.standby_queued > 0 {
            self.standby_queued -= 1;
        }

        let Some(dest) = self.destination else {
            // Fresh agent (or revived before its first plan): plan from here.
            self.advance_plan(net, now, self.at_node)?;
            return Ok(effects);
        };

        let target = net.node(dest.node).pos;
        let arrival_radius = self.config.speed_per_tick() / 2.0;
        if self.pos.distance(target) > arrival_radius {
            // En route: move linearly, clamped to the target.
            self.pos = self.pos.step_toward(target, self.config.speed_per_tick());
            return Ok(effects);
        }

        // Arrived (or dwelling).  Recharge takes precedence over dwelling
        // when the battery cannot cover the remaining dwell time.
        let node = net.node(dest.node);
        let dwell_needed = node.inspect_ticks.saturating_sub(self.dwell);
        if node.recharge && self.battery < dwell_needed {
            self.recharge_countdown.arm_for(self.config.recharge_ticks);
            return Ok(effects);
        }

        // A node still inside its re-inspection spacing is not worth dwelling
        // at: the cycle wraps up on the arrival tick and the agent moves on.
        let since_last = now.0 - node.last_inspection_time_at(now).0;
        if since_last < node.min_ticks_between_inspections {
            self.dwell = 0;
            self.complete_cycle(net, now, dest, &mut effects)?;
            return Ok(effects);
        }

        self.dwell += 1;
        if self.dwell >= node.inspect_ticks {
            self.dwell = 0;
            self.complete_cycle(net, now, dest, &mut effects)?;
        }
        Ok(effects)
    }

    /// Finish the inspection cycle at `dest` and set off on the next leg.
    fn complete_cycle(
        &mut self,
        net: &mut InspectionNetwork,
        now: Tick,
        dest: EdgeNodeLocation,
        effects: &mut Vec<StepEffect>,
    ) -> FleetResult<()> {
        self.pos = net.node(dest.node).pos;
        self.at_node = dest.node;

        // Queued standby becomes active once the in-flight work is wrapped up.
        if self.standby_queued > 0 {
            self.standby_active = self.standby_queued;
            self.standby_queued = 0;
        }

        // Node inspection, gated by the node's minimum re-inspection spacing.
        let node = net.node_mut(dest.node);
        let since_last = now.0 - node.last_inspection_time_at(now).0;
        if since_last >= node.min_ticks_between_inspections {
            node.record_inspection(now);
            if self.strategy.announces() {
                effects.push(StepEffect::Announce {
                    from: self.id,
                    origin: self.pos,
                    entity: EntityRef::Node(dest.node),
                    t: now,
                });
            }
        }

        // Edge inspection completes regardless.
        if let Some(edge) = dest.edge {
            net.complete_edge_inspection(edge, self.id, now);
            if self.strategy.announces() {
                effects.push(StepEffect::Announce {
                    from: self.id,
                    origin: self.pos,
                    entity: EntityRef::Edge(edge),
                    t: now,
                });
            }
        }

        self.advance_plan(net, now, dest.node)
    }

    /// Ask the strategy for the next leg from `from`, arm a recharge first if
    /// the leg is not safely flyable, and begin tracking the new edge.
    fn advance_plan(
        &mut self,
        net: &mut InspectionNetwork,
        now: Tick,
        from: NodeId,
    ) -> FleetResult<()> {
        let next = {
            let mut ctx = NavCtx {
                net,
                now,
                rng: &mut self.rng,
                max_flight_distance: self.config.max_flight_distance(),
            };
            self.strategy.next_destination(&mut ctx, from)?
        };

        // Leaving a recharge node means topping up now when the next stop
        // cannot recharge, or when the straight hop is not safely flyable on
        // the remaining battery: there may be no chance later.
        if net.node(from).recharge {
            let next_node = net.node(next.node);
            let hop = self.pos.distance(next_node.pos);
            let remaining_range = self.battery as f64 * self.config.speed_per_tick();
            if !next_node.recharge || hop * RANGE_SAFETY_MARGIN > remaining_range {
                self.recharge_countdown.arm_for(self.config.recharge_ticks);
            }
        }

        if let Some(edge) = next.edge {
            net.edge_mut(edge).start_inspection(self.id, now);
        }
        self.destination = Some(next);
        Ok(())
    }
}
