//! smallnet — smallest runnable scenario for the patrol fleet simulator.
//!
//! Three UAVs patrol a synthetic 6×6 survey grid for one simulated week,
//! coordinating over broadcast (inter-UAV LNI).  Random inspection demand
//! lands on the high-risk trunk lines and occasional failures take agents
//! down for up to two hours.  Results land in `./output/` as CSV.

mod network;

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use patrol_core::{Tick, TICKS_PER_DAY};
use patrol_fleet::UavConfig;
use patrol_nav::StrategySpec;
use patrol_output::{ComplianceCsvWriter, PositionSnapshotWriter};
use patrol_sim::{GeneratorSpec, NetworkSource, SimulationBuilder, SimulationConfig};

// ── Constants ─────────────────────────────────────────────────────────────────

const UAV_COUNT: usize = 3;
const SEED: u64 = 42;
const SIM_DAYS: u64 = 7;
const OUTPUT_INTERVAL_TICKS: u64 = 60; // snapshot every simulated hour

fn main() -> Result<()> {
    println!("=== smallnet — patrol UAV fleet ===");
    println!("UAVs: {UAV_COUNT}  |  Days: {SIM_DAYS}  |  Seed: {SEED}");
    println!();

    let config = SimulationConfig {
        total_ticks: SIM_DAYS * TICKS_PER_DAY,
        seed: SEED,
        uav_count: UAV_COUNT,
        uav: UavConfig::default(),
        strategy: StrategySpec::InterUavLni,
        network: NetworkSource::Inline(network::build_spec()),
        merge_radius: 0.5,
        recharge_everywhere: false,
        min_ticks_between_inspections: 0,
        inspect_ticks: 2,
        node_sla_interval: TICKS_PER_DAY,
        edge_sla_interval: TICKS_PER_DAY / 2,
        response_time_goal: 120,
        min_average_compliance: 90.0,
        min_per_sla_compliance: 50.0,
        flight_days_per_month: 30,
        flight_minutes_per_day: 1_440,
        events: vec![
            // Roughly one demand spike per 12 simulated hours.
            GeneratorSpec::EdgeInspections { stride: 720, likelihood: 0.2 },
            // Rare failures, 30 min – 2 h of downtime.
            GeneratorSpec::Failures {
                stride: 1_440,
                likelihood: 0.1,
                min_downtime: 30,
                max_downtime: 120,
            },
        ],
        output_interval_ticks: OUTPUT_INTERVAL_TICKS,
    };

    let mut sim = SimulationBuilder::new(config).build()?;
    println!(
        "Survey network: {} points, {} segments",
        sim.network().node_count(),
        sim.network().edge_count()
    );

    let out_dir = Path::new("./output");
    fs::create_dir_all(out_dir)?;
    let mut observer = PositionSnapshotWriter::new(&out_dir.join("positions.csv"))?;

    let started = Instant::now();
    sim.run(&mut observer)?;
    if let Some(e) = observer.take_error() {
        eprintln!("output error: {e}");
    }
    let end = sim.current_tick();
    println!("Simulated {} ticks in {:.2?}", end.0, started.elapsed());
    println!();

    let mut compliance = ComplianceCsvWriter::new(&out_dir.join("compliance.csv"))?;
    compliance.write_series(&sim.compliance_time_series(Tick::ZERO, end))?;
    compliance.finish()?;

    println!(
        "Overall compliance:   {:.1}%",
        sim.percentage_fulfilled_between(Tick::ZERO, end)
    );
    println!(
        "Lowest sample:        {:.1}%",
        sim.lowest_percentage(Tick::ZERO, end)
    );
    println!(
        "Avg response time:    {:.1} ticks",
        sim.average_response_time()
    );
    println!(
        "Avg standby per UAV:  {:.1} ticks",
        sim.average_standby_time()
    );
    println!(
        "Coverage goals met:   {}",
        if sim.goals_met(Tick::ZERO, end) { "yes" } else { "no" }
    );
    println!();
    println!("CSV output written to {}", out_dir.display());
    Ok(())
}
