//! Builder: config document → ready-to-run [`Simulation`].
//!
//! Every validation failure happens here, before any state is runnable: SLA
//! intervals, fleet size, flight calendar, network loading, tour computation,
//! and generator construction all fail fast.

use patrol_core::{EdgeId, NodeId, SimClock, SimRng, Tick};
use patrol_events::EventQueue;
use patrol_fleet::Dispatcher;
use patrol_nav::CycleTour;
use patrol_net::{build_network, EntityRef, InspectionNetwork, LoadOptions, NetworkSpec};
use patrol_sla::{FlightWindow, PeriodicSla, ResponseTimeSla, SlaEngine};

use crate::config::{NetworkSource, SimulationConfig};
use crate::sim::Simulation;
use crate::{SimError, SimResult};

/// Fraction of the full-battery range allowed between synthesized recharge
/// waypoints when `recharge_everywhere` is set.
const SEGMENT_RANGE_FRACTION: f64 = 0.75;

pub struct SimulationBuilder {
    config: SimulationConfig,
    network: Option<InspectionNetwork>,
}

impl SimulationBuilder {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config, network: None }
    }

    /// Use an already-built network instead of loading from the config's
    /// source.  Tests and generated scenarios inject networks this way.
    pub fn network(mut self, network: InspectionNetwork) -> Self {
        self.network = Some(network);
        self
    }

    pub fn build(self) -> SimResult<Simulation> {
        let config = self.config;

        if config.uav_count == 0 {
            return Err(SimError::NoAgents);
        }
        if config.node_sla_interval == 0 && config.edge_sla_interval == 0 {
            return Err(SimError::NoSlaIntervals);
        }
        let flight = FlightWindow::new(
            config.flight_days_per_month,
            config.flight_minutes_per_day,
        )?;

        // ── Network ───────────────────────────────────────────────────────
        let net = match self.network {
            Some(n) => n,
            None => {
                let spec = match &config.network {
                    NetworkSource::Path(path) => NetworkSpec::from_path(path)?,
                    NetworkSource::Inline(spec) => spec.clone(),
                };
                let opts = LoadOptions {
                    merge_radius: config.merge_radius,
                    max_segment_length: config
                        .recharge_everywhere
                        .then(|| config.uav.max_flight_distance() * SEGMENT_RANGE_FRACTION),
                    min_ticks_between_inspections: config.min_ticks_between_inspections,
                    inspect_ticks: config.inspect_ticks,
                };
                build_network(&spec, &opts)?
            }
        };

        // ── Fleet ─────────────────────────────────────────────────────────
        //
        // Cycle agents are staggered evenly along the tour; every other
        // strategy starts on an evenly strided node so the fleet spreads
        // over the network from tick 0.
        let tour = if config.strategy.needs_tour() {
            Some(CycleTour::compute(&net, NodeId(0))?)
        } else {
            None
        };
        let spacing = tour
            .as_ref()
            .map_or(0, |t| t.len() / config.uav_count);
        let stride = net.node_count() / config.uav_count;

        let mut dispatcher = Dispatcher::new(config.uav.clone(), config.seed);
        for i in 0..config.uav_count {
            let strategy = config.strategy.build(tour.as_ref(), spacing * i)?;
            if tour.is_some() {
                dispatcher.add_uav(strategy, &net, Tick::ZERO)?;
            } else {
                let start = NodeId((stride * i) as u32);
                dispatcher.add_uav_at(strategy, &net, Tick::ZERO, start);
            }
        }

        // ── SLAs ──────────────────────────────────────────────────────────
        let mut sla = SlaEngine::new(flight);
        if config.node_sla_interval > 0 {
            for i in 0..net.node_count() as u32 {
                sla.add_periodic(PeriodicSla::new(
                    EntityRef::Node(NodeId(i)),
                    config.node_sla_interval,
                ));
            }
        }
        if config.edge_sla_interval > 0 {
            for i in 0..net.edge_count() as u32 {
                sla.add_periodic(PeriodicSla::new(
                    EntityRef::Edge(EdgeId(i)),
                    config.edge_sla_interval,
                ));
            }
        }
        if config.response_time_goal > 0 {
            sla.set_response(ResponseTimeSla::new(config.response_time_goal));
        }

        // ── Events ────────────────────────────────────────────────────────
        let mut queue = EventQueue::new();
        for (i, spec) in config.events.iter().enumerate() {
            let mut generator = spec.build(config.seed.wrapping_add(i as u64 + 1))?;
            let population = spec.population(&net, config.uav_count);
            queue.extend(
                generator
                    .events(population, Tick::ZERO, config.end_tick())
                    .iter()
                    .copied(),
            );
        }

        Ok(Simulation {
            rng: SimRng::new(config.seed),
            clock: SimClock::default(),
            config,
            net,
            dispatcher,
            sla,
            tour,
            queue,
        })
    }
}
