//! Run configuration.
//!
//! Everything a run needs travels in one serde document: the fleet, the
//! network source, the SLA targets, the flight calendar, the strategy, and
//! the event generators.  Generator and strategy selection are closed tagged
//! enums — an unknown kind fails at parse time, not at build time.

use patrol_core::Tick;
use patrol_events::{
    EventGenerator, EventKind, EventResult, ProbabilisticEventGenerator,
    ProbabilisticFailureGenerator, StaticEventGenerator, StaticFailureGenerator,
};
use patrol_fleet::UavConfig;
use patrol_nav::StrategySpec;
use patrol_net::{InspectionNetwork, NetworkSpec};
use serde::{Deserialize, Serialize};

// ── Network source ────────────────────────────────────────────────────────────

/// Where the survey network comes from: a JSON file on disk or an inline
/// spec (tests, generated scenarios).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NetworkSource {
    Path(String),
    Inline(NetworkSpec),
}

// ── Generator specs ───────────────────────────────────────────────────────────

/// Event-generator selection, as it appears in configuration files.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeneratorSpec {
    /// Edge-inspection demand at explicit ticks.
    StaticEdgeInspections { ticks: Vec<u64> },
    /// Node-inspection demand at explicit ticks.
    StaticNodeInspections { ticks: Vec<u64> },
    /// Agent failures at explicit ticks.
    StaticFailures {
        ticks: Vec<u64>,
        min_downtime: u64,
        max_downtime: u64,
    },
    /// Bernoulli-sampled edge-inspection demand.
    EdgeInspections { stride: u64, likelihood: f64 },
    /// Bernoulli-sampled node-inspection demand.
    NodeInspections { stride: u64, likelihood: f64 },
    /// Bernoulli-sampled agent failures with in-flight tracking.
    Failures {
        stride: u64,
        likelihood: f64,
        min_downtime: u64,
        max_downtime: u64,
    },
}

impl GeneratorSpec {
    /// Build the generator.  `base_seed` should already be unique per spec.
    pub fn build(&self, base_seed: u64) -> EventResult<Box<dyn EventGenerator>> {
        Ok(match *self {
            GeneratorSpec::StaticEdgeInspections { ref ticks } => {
                Box::new(StaticEventGenerator::new(
                    ticks.iter().map(|&t| Tick(t)).collect(),
                    EventKind::EdgeInspection(None),
                ))
            }
            GeneratorSpec::StaticNodeInspections { ref ticks } => {
                Box::new(StaticEventGenerator::new(
                    ticks.iter().map(|&t| Tick(t)).collect(),
                    EventKind::NodeInspection(None),
                ))
            }
            GeneratorSpec::StaticFailures { ref ticks, min_downtime, max_downtime } => {
                Box::new(StaticFailureGenerator::new(
                    ticks.iter().map(|&t| Tick(t)).collect(),
                    min_downtime,
                    max_downtime,
                    base_seed,
                )?)
            }
            GeneratorSpec::EdgeInspections { stride, likelihood } => {
                Box::new(ProbabilisticEventGenerator::new(
                    stride,
                    likelihood,
                    EventKind::EdgeInspection(None),
                    base_seed,
                )?)
            }
            GeneratorSpec::NodeInspections { stride, likelihood } => {
                Box::new(ProbabilisticEventGenerator::new(
                    stride,
                    likelihood,
                    EventKind::NodeInspection(None),
                    base_seed,
                )?)
            }
            GeneratorSpec::Failures { stride, likelihood, min_downtime, max_downtime } => {
                Box::new(ProbabilisticFailureGenerator::new(
                    stride,
                    likelihood,
                    min_downtime,
                    max_downtime,
                    base_seed,
                )?)
            }
        })
    }

    /// Sampling cardinality for this generator: fleet size for failures,
    /// asset count for inspection demand.
    pub fn population(&self, net: &InspectionNetwork, uav_count: usize) -> usize {
        match self {
            GeneratorSpec::StaticFailures { .. } | GeneratorSpec::Failures { .. } => uav_count,
            GeneratorSpec::StaticEdgeInspections { .. }
            | GeneratorSpec::EdgeInspections { .. } => net.edge_count(),
            GeneratorSpec::StaticNodeInspections { .. }
            | GeneratorSpec::NodeInspections { .. } => net.node_count(),
        }
    }
}

// ── SimulationConfig ──────────────────────────────────────────────────────────

fn default_merge_radius() -> f64 {
    5.0
}

fn default_inspect_ticks() -> u64 {
    1
}

fn default_flight_days() -> u64 {
    30
}

fn default_flight_minutes() -> u64 {
    1_440
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Run length in ticks (one tick = one simulated minute).
    pub total_ticks: u64,
    /// Global seed; every RNG in the run derives from it.
    pub seed: u64,

    /// Fleet size.
    pub uav_count: usize,
    /// Shared physical parameters.
    #[serde(default)]
    pub uav: UavConfig,
    /// Routing policy for every agent.
    pub strategy: StrategySpec,

    /// Network file path or inline spec.
    pub network: NetworkSource,
    /// Survey points closer than this merge into one node.
    #[serde(default = "default_merge_radius")]
    pub merge_radius: f64,
    /// Split long segments and synthesize recharge waypoints so any strategy
    /// can complete any leg.
    #[serde(default)]
    pub recharge_everywhere: bool,
    /// Minimum ticks between two counted inspections of the same node.
    #[serde(default)]
    pub min_ticks_between_inspections: u64,
    /// Dwell ticks per node inspection.
    #[serde(default = "default_inspect_ticks")]
    pub inspect_ticks: u64,

    /// Periodic SLA interval per node; 0 registers no node SLAs.
    #[serde(default)]
    pub node_sla_interval: u64,
    /// Periodic SLA interval per edge; 0 registers no edge SLAs.
    #[serde(default)]
    pub edge_sla_interval: u64,
    /// On-demand response-time goal in ticks; 0 disables the response SLA.
    #[serde(default)]
    pub response_time_goal: u64,
    /// Acceptance goal: minimum mean compliance percentage over the run.
    #[serde(default)]
    pub min_average_compliance: f64,
    /// Acceptance goal: floor no individual SLA may fall under.
    #[serde(default)]
    pub min_per_sla_compliance: f64,

    #[serde(default = "default_flight_days")]
    pub flight_days_per_month: u64,
    #[serde(default = "default_flight_minutes")]
    pub flight_minutes_per_day: u64,

    /// Scheduled demand and failure injection.
    #[serde(default)]
    pub events: Vec<GeneratorSpec>,

    /// Observer snapshot cadence; 0 disables snapshots.
    #[serde(default)]
    pub output_interval_ticks: u64,
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }
}
