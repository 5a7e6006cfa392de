use tempfile::TempDir;

use patrol_core::Tick;

use crate::csv::ComplianceCsvWriter;
use crate::observer::PositionSnapshotWriter;
use crate::row::ComplianceRow;

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

// ── Compliance writer ─────────────────────────────────────────────────────────

mod compliance {
    use super::*;

    #[test]
    fn file_created_with_header() {
        let dir = tmp();
        let path = dir.path().join("compliance.csv");
        let mut w = ComplianceCsvWriter::new(&path).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["tick", "percent_fulfilled"]);
    }

    #[test]
    fn series_round_trip() {
        let dir = tmp();
        let path = dir.path().join("compliance.csv");
        let mut w = ComplianceCsvWriter::new(&path).unwrap();
        w.write_series(&[(Tick(0), 100.0), (Tick(10), 87.5), (Tick(20), 100.0)])
            .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[1][0], "10");
        assert_eq!(&rows[1][1], "87.5");
        assert_eq!(&rows[2][1], "100");
    }

    #[test]
    fn single_rows_append() {
        let dir = tmp();
        let path = dir.path().join("compliance.csv");
        let mut w = ComplianceCsvWriter::new(&path).unwrap();
        w.write_row(&ComplianceRow { tick: 5, percent_fulfilled: 50.0 }).unwrap();
        w.write_row(&ComplianceRow { tick: 6, percent_fulfilled: 75.0 }).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        assert_eq!(rdr.records().count(), 2);
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = ComplianceCsvWriter::new(&dir.path().join("compliance.csv")).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

// ── Position snapshot observer ────────────────────────────────────────────────

mod positions {
    use super::*;

    use patrol_fleet::UavConfig;
    use patrol_nav::StrategySpec;
    use patrol_net::{EdgeSpec, NetworkSpec, NodeSpec};
    use patrol_sim::{NetworkSource, SimulationBuilder, SimulationConfig};

    fn config() -> SimulationConfig {
        SimulationConfig {
            total_ticks: 25,
            seed: 9,
            uav_count: 1,
            uav: UavConfig {
                speed_km_h: 60.0,
                battery_ticks: 10_000,
                recharge_ticks: 3,
                broadcast_radius: 100.0,
            },
            strategy: StrategySpec::GreedyLni,
            network: NetworkSource::Inline(NetworkSpec {
                nodes: vec![
                    NodeSpec { x: 0.0, y: 0.0, recharge: false },
                    NodeSpec { x: 1.0, y: 0.0, recharge: false },
                ],
                edges: vec![EdgeSpec { source: 0, target: 1, risk: 1.0 }],
            }),
            merge_radius: 0.1,
            recharge_everywhere: false,
            min_ticks_between_inspections: 0,
            inspect_ticks: 1,
            node_sla_interval: 50,
            edge_sla_interval: 50,
            response_time_goal: 0,
            min_average_compliance: 0.0,
            min_per_sla_compliance: 0.0,
            flight_days_per_month: 30,
            flight_minutes_per_day: 1_440,
            events: Vec::new(),
            output_interval_ticks: 10,
        }
    }

    #[test]
    fn records_one_row_per_agent_per_snapshot() {
        let dir = tmp();
        let path = dir.path().join("positions.csv");
        let mut sim = SimulationBuilder::new(config()).build().unwrap();
        let mut obs = PositionSnapshotWriter::new(&path).unwrap();
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["tick", "agent_id", "x", "y", "status"]);

        // Snapshots at ticks 0, 10, 20 with one agent.
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[1][0], "10");
        assert_eq!(&rows[2][0], "20");
        assert_eq!(&rows[0][1], "0");
        assert_eq!(&rows[0][4], "active");
    }

    #[test]
    fn positions_stay_on_the_surveyed_segment() {
        let dir = tmp();
        let path = dir.path().join("positions.csv");
        let mut sim = SimulationBuilder::new(config()).build().unwrap();
        let mut obs = PositionSnapshotWriter::new(&path).unwrap();
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        for record in rdr.records() {
            let record = record.unwrap();
            let x: f64 = record[2].parse().unwrap();
            let y: f64 = record[3].parse().unwrap();
            assert!((0.0..=1.0).contains(&x));
            assert_eq!(y, 0.0);
        }
    }
}
