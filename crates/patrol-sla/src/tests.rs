use patrol_core::{EdgeId, NodeId, Point2, Tick};
use patrol_net::{EntityRef, Inspectable, InspectionNetwork, Node};

use crate::engine::SlaEngine;
use crate::sla::{PeriodicSla, ResponseTimeSla};
use crate::window::FlightWindow;
use crate::SlaError;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Two nodes and one edge; enough surface for every SLA shape.
fn small_net() -> InspectionNetwork {
    let mut net = InspectionNetwork::new();
    let a = net.add_node(Node::new(Point2::new(0.0, 0.0), false, 0, 1));
    let b = net.add_node(Node::new(Point2::new(100.0, 0.0), false, 0, 1));
    net.add_edge(a, b, 1.0).unwrap();
    net
}

fn engine() -> SlaEngine {
    SlaEngine::new(FlightWindow::unrestricted())
}

// ── PeriodicSla ───────────────────────────────────────────────────────────────

mod periodic {
    use super::*;

    #[test]
    fn boundary_is_inclusive() {
        let mut net = small_net();
        net.node_mut(NodeId(0)).record_inspection(Tick(5));
        let sla = PeriodicSla::new(EntityRef::Node(NodeId(0)), 10);
        assert!(sla.is_fulfilled(&net, Tick(15)));
        assert!(!sla.is_fulfilled(&net, Tick(16)));
    }

    #[test]
    fn uninspected_assets_age_from_tick_zero() {
        let net = small_net();
        let sla = PeriodicSla::new(EntityRef::Edge(EdgeId(0)), 50);
        assert!(sla.is_fulfilled(&net, Tick(50)));
        assert!(!sla.is_fulfilled(&net, Tick(51)));
    }
}

// ── ResponseTimeSla ───────────────────────────────────────────────────────────

mod response {
    use super::*;

    #[test]
    fn pairs_needed_times_with_the_next_inspection() {
        let mut net = small_net();
        let node = net.node_mut(NodeId(0));
        node.mark_needed(Tick(3));
        node.record_inspection(Tick(10));
        node.mark_needed(Tick(20));
        node.record_inspection(Tick(22));
        let sla = ResponseTimeSla::new(5);
        assert_eq!(sla.response_times(&net), vec![2, 7]);
        assert_eq!(sla.average_response_time(&net), 4.5);
        assert!(sla.is_fulfilled(&net));
    }

    #[test]
    fn unanswered_requests_are_excluded_not_zero() {
        let mut net = small_net();
        net.node_mut(NodeId(0)).mark_needed(Tick(50));
        let sla = ResponseTimeSla::new(5);
        assert!(sla.response_times(&net).is_empty());
        assert_eq!(sla.average_response_time(&net), 0.0);
    }
}

// ── FlightWindow ──────────────────────────────────────────────────────────────

mod window {
    use super::*;

    #[test]
    fn gates_on_day_of_month_and_minute_of_day() {
        let w = FlightWindow::new(2, 60).unwrap();
        assert!(w.is_flight_time(Tick(0)));
        assert!(w.is_flight_time(Tick(59)));
        // Past the daily minutes.
        assert!(!w.is_flight_time(Tick(60)));
        // Second flying day, midnight.
        assert!(w.is_flight_time(Tick(1_440)));
        // Third day of the month is grounded.
        assert!(!w.is_flight_time(Tick(2_880)));
        // Next month starts the cycle over.
        assert!(w.is_flight_time(Tick(43_200)));
    }

    #[test]
    fn unrestricted_never_grounds() {
        let w = FlightWindow::unrestricted();
        for t in [0u64, 1_439, 43_199, 1_000_000] {
            assert!(w.is_flight_time(Tick(t)), "tick {t}");
        }
    }

    #[test]
    fn rejects_degenerate_windows() {
        assert_eq!(
            FlightWindow::new(0, 60).err(),
            Some(SlaError::InvalidFlightWindow { days: 0, minutes: 60 })
        );
        assert!(FlightWindow::new(31, 60).is_err());
        assert!(FlightWindow::new(5, 0).is_err());
        assert!(FlightWindow::new(5, 2_000).is_err());
    }
}

// ── SlaEngine ─────────────────────────────────────────────────────────────────

mod engine {
    use super::*;

    #[test]
    fn constantly_true_predicate_scores_exactly_100() {
        let net = small_net();
        let mut eng = engine();
        // Interval longer than the window: trivially always fulfilled.
        eng.add_periodic(PeriodicSla::new(EntityRef::Node(NodeId(0)), 1_000_000));
        let sla = PeriodicSla::new(EntityRef::Node(NodeId(0)), 1_000_000);
        assert_eq!(eng.percentage(&net, &sla, Tick(0), Tick(500), 1), 100.0);
        assert_eq!(eng.percentage_fulfilled_between(&net, Tick(0), Tick(500)), 100.0);
    }

    #[test]
    fn percentages_stay_in_bounds() {
        let mut net = small_net();
        net.node_mut(NodeId(0)).record_inspection(Tick(100));
        let mut eng = engine();
        eng.add_periodic(PeriodicSla::new(EntityRef::Node(NodeId(0)), 40));
        eng.add_periodic(PeriodicSla::new(EntityRef::Edge(EdgeId(0)), 40));
        for (_, v) in eng.compliance_time_series(&net, Tick(0), Tick(400)) {
            assert!((0.0..=100.0).contains(&v));
        }
        let low = eng.lowest_percentage(&net, Tick(0), Tick(400));
        assert!((0.0..=100.0).contains(&low));
    }

    #[test]
    fn no_slas_means_zero_not_a_division_by_zero() {
        let net = small_net();
        let eng = engine();
        assert_eq!(eng.percentage_fulfilled_at(&net, Tick(10)), 0.0);
        assert_eq!(eng.lowest_percentage(&net, Tick(0), Tick(100)), 0.0);
        assert_eq!(eng.coverage_above(&net, Tick(0), Tick(100), 50.0), 0.0);
    }

    #[test]
    fn point_query_is_the_fulfilled_fraction() {
        let mut net = small_net();
        net.node_mut(NodeId(0)).record_inspection(Tick(90));
        let mut eng = engine();
        eng.add_periodic(PeriodicSla::new(EntityRef::Node(NodeId(0)), 20));
        eng.add_periodic(PeriodicSla::new(EntityRef::Edge(EdgeId(0)), 20));
        // Node fresh, edge stale: half the SLAs hold.
        assert_eq!(eng.percentage_fulfilled_at(&net, Tick(100)), 50.0);
    }

    #[test]
    fn series_has_one_sample_per_stride() {
        let net = small_net();
        let mut eng = engine().with_sample_points(100);
        eng.add_periodic(PeriodicSla::new(EntityRef::Node(NodeId(0)), 10));
        let series = eng.compliance_time_series(&net, Tick(0), Tick(100));
        assert_eq!(series.len(), 100);
        assert_eq!(series[0].0, Tick(0));
        assert_eq!(series[99].0, Tick(99));
    }

    #[test]
    fn constant_series_has_zero_variance() {
        let net = small_net();
        let mut eng = engine();
        eng.add_periodic(PeriodicSla::new(EntityRef::Node(NodeId(0)), 1_000_000));
        assert_eq!(eng.time_variance(&net, Tick(0), Tick(500)), 0.0);
        assert_eq!(eng.sla_variance(&net, Tick(0), Tick(500)), 0.0);
    }

    #[test]
    fn coverage_counts_slas_above_the_threshold() {
        let mut net = small_net();
        // Node inspected regularly; edge never.
        for t in (0..400).step_by(20) {
            net.node_mut(NodeId(0)).record_inspection(Tick(t));
        }
        let mut eng = engine();
        eng.add_periodic(PeriodicSla::new(EntityRef::Node(NodeId(0)), 30));
        eng.add_periodic(PeriodicSla::new(EntityRef::Edge(EdgeId(0)), 30));
        assert_eq!(eng.coverage_above(&net, Tick(0), Tick(400), 90.0), 0.5);
        assert!(!eng.all_above(&net, Tick(0), Tick(400), 90.0));
        assert!(eng.all_above(&net, Tick(0), Tick(400), 0.0));
        assert!(!eng.fulfilled(&net, Tick(0), Tick(400), 95.0, 90.0));
    }

    #[test]
    fn clear_drops_everything() {
        let mut eng = engine();
        eng.add_periodic(PeriodicSla::new(EntityRef::Node(NodeId(0)), 10));
        eng.set_response(ResponseTimeSla::new(5));
        eng.clear();
        assert_eq!(eng.sla_count(), 0);
        let net = small_net();
        assert_eq!(eng.average_response_time(&net), 0.0);
    }
}
