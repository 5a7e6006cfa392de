//! The `Simulation` struct and its tick loop.

use patrol_core::{AgentId, EdgeId, NodeId, SimClock, SimRng, Tick};
use patrol_events::{Event, EventKind, EventQueue};
use patrol_fleet::{Dispatcher, FleetError};
use patrol_nav::CycleTour;
use patrol_net::{Inspectable, InspectionNetwork};
use patrol_sla::SlaEngine;

use crate::config::SimulationConfig;
use crate::observer::SimObserver;
use crate::SimResult;

/// One assembled run.
///
/// Each tick proceeds in a fixed order:
///
/// 1. due pheromone decays are applied,
/// 2. due events fire (random targets resolved, dispatches attempted,
///    failures injected),
/// 3. every agent steps, in id order, inside or outside the flight window,
/// 4. observer hooks report the tick.
///
/// The clock only moves forward and nothing is suspended mid-tick, so a run
/// is fully determined by its configuration.
///
/// Create via [`SimulationBuilder`][crate::SimulationBuilder].
pub struct Simulation {
    pub(crate) config: SimulationConfig,
    pub(crate) clock: SimClock,
    pub(crate) net: InspectionNetwork,
    pub(crate) dispatcher: Dispatcher,
    pub(crate) sla: SlaEngine,
    /// Present only when the cycle strategy is selected; kept so late-added
    /// agents share the fleet's tour.
    pub(crate) tour: Option<CycleTour>,
    pub(crate) queue: EventQueue,
    pub(crate) rng: SimRng,
}

impl Simulation {
    // ── Running ───────────────────────────────────────────────────────────

    /// Run from the current tick to `config.total_ticks`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            let now = self.clock.current_tick;
            self.process_tick(now, observer)?;
            self.clock.advance();
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores the
    /// configured end).  Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            self.process_tick(now, observer)?;
            self.clock.advance();
        }
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<()> {
        observer.on_tick_start(now);

        self.net.apply_due_decays(now);

        for event in self.queue.drain_tick(now) {
            self.fire_event(now, event, observer)?;
        }

        let flying = self.sla.is_flight_time(now);
        self.dispatcher.step_all(&mut self.net, now, flying)?;

        observer.on_tick_end(now);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.dispatcher, &self.net);
        }
        Ok(())
    }

    // ── Event handling ────────────────────────────────────────────────────

    fn fire_event<O: SimObserver>(
        &mut self,
        now: Tick,
        event: Event,
        observer: &mut O,
    ) -> SimResult<()> {
        let handled = match event.kind {
            EventKind::EdgeInspection(target) => {
                match target.or_else(|| self.random_unflagged_edge()) {
                    Some(edge) => self.request_edge_inspection(edge, now)?,
                    None => false,
                }
            }
            EventKind::NodeInspection(target) => {
                match target.or_else(|| self.random_unflagged_node()) {
                    Some(node) => self.request_node_inspection(node, now)?,
                    None => false,
                }
            }
            EventKind::Failure { downtime } => {
                match self.dispatcher.random_active_uav(&mut self.rng) {
                    Ok(id) => {
                        self.dispatcher.force_crash(&mut self.net, id, downtime)?;
                        true
                    }
                    Err(FleetError::AllCrashed) => false,
                    Err(e) => return Err(e.into()),
                }
            }
        };
        if handled {
            observer.on_event_fired(now, &event);
        } else {
            observer.on_request_dropped(now, &event);
        }
        Ok(())
    }

    /// Flag `edge` as needing inspection and dispatch the best-placed agent.
    pub fn request_edge_inspection(&mut self, edge: EdgeId, now: Tick) -> SimResult<bool> {
        self.net.edge_mut(edge).mark_needed(now);
        Ok(self.dispatcher.inspection_requested_edge(&self.net, edge)?)
    }

    /// Flag `node` as needing inspection and dispatch the best-placed agent.
    pub fn request_node_inspection(&mut self, node: NodeId, now: Tick) -> SimResult<bool> {
        self.net.node_mut(node).mark_needed(now);
        Ok(self.dispatcher.inspection_requested_node(&self.net, node)?)
    }

    /// A uniformly random edge that is not already flagged.
    fn random_unflagged_edge(&mut self) -> Option<EdgeId> {
        let candidates: Vec<EdgeId> = (0..self.net.edge_count() as u32)
            .map(EdgeId)
            .filter(|&e| !self.net.edge(e).needs_inspection())
            .collect();
        self.rng.choose(&candidates).copied()
    }

    /// A uniformly random node that is not already flagged.
    fn random_unflagged_node(&mut self) -> Option<NodeId> {
        let candidates: Vec<NodeId> = (0..self.net.node_count() as u32)
            .map(NodeId)
            .filter(|&n| !self.net.node(n).needs_inspection())
            .collect();
        self.rng.choose(&candidates).copied()
    }

    // ── Interactive hooks ─────────────────────────────────────────────────

    /// Crash `id` for `downtime` ticks, rearming if already crashed.
    pub fn force_crash(&mut self, id: AgentId, downtime: u64) -> SimResult<()> {
        Ok(self.dispatcher.force_crash(&mut self.net, id, downtime)?)
    }

    /// Add one more agent mid-run, using the configured strategy.
    pub fn add_uav(&mut self) -> SimResult<AgentId> {
        let strategy = self.config.strategy.build(self.tour.as_ref(), 0)?;
        Ok(self
            .dispatcher
            .add_uav(strategy, &self.net, self.clock.current_tick)?)
    }

    // ── Accessors and statistics ──────────────────────────────────────────

    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn network(&self) -> &InspectionNetwork {
        &self.net
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn sla_engine(&self) -> &SlaEngine {
        &self.sla
    }

    pub fn percentage_fulfilled_between(&self, first: Tick, last: Tick) -> f64 {
        self.sla.percentage_fulfilled_between(&self.net, first, last)
    }

    pub fn lowest_percentage(&self, first: Tick, last: Tick) -> f64 {
        self.sla.lowest_percentage(&self.net, first, last)
    }

    pub fn compliance_time_series(&self, first: Tick, last: Tick) -> Vec<(Tick, f64)> {
        self.sla.compliance_time_series(&self.net, first, last)
    }

    /// Acceptance verdict against the configured coverage goals.
    pub fn goals_met(&self, first: Tick, last: Tick) -> bool {
        self.sla.fulfilled(
            &self.net,
            first,
            last,
            self.config.min_average_compliance,
            self.config.min_per_sla_compliance,
        )
    }

    pub fn average_response_time(&self) -> f64 {
        self.sla.average_response_time(&self.net)
    }

    pub fn response_times(&self) -> Vec<u64> {
        self.sla.response_times(&self.net)
    }

    pub fn average_standby_time(&self) -> f64 {
        self.dispatcher.average_standby_time()
    }

    /// Lap length once the cycle strategy has measured one.
    pub fn steps_in_cycle(&self) -> Option<u64> {
        self.dispatcher.steps_in_cycle()
    }
}
