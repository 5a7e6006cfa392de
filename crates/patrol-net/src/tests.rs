//! Unit tests for the network model, loader, and shortest paths.

use patrol_core::{NodeId, Point2};

use crate::network::{InspectionNetwork, Node};

/// Square with one diagonal: 0-1-2-3-0 plus 0-2.
fn square_net() -> InspectionNetwork {
    let mut net = InspectionNetwork::new();
    let positions = [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)];
    for (x, y) in positions {
        net.add_node(Node::new(Point2::new(x, y), false, 0, 1));
    }
    for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)] {
        net.add_edge(NodeId(a), NodeId(b), 1.0).unwrap();
    }
    net
}

#[cfg(test)]
mod log {
    use crate::InspectionLog;
    use patrol_core::Tick;

    #[test]
    fn last_inspection_never_exceeds_query_time() {
        let mut log = InspectionLog::new();
        log.add_inspection(Tick(10));
        log.add_inspection(Tick(20));
        log.add_inspection(Tick(30));
        for t in 0..40 {
            assert!(log.last_inspection_time_at(Tick(t)) <= Tick(t));
        }
    }

    #[test]
    fn last_inspection_is_monotone() {
        let mut log = InspectionLog::new();
        for t in [5u64, 17, 40] {
            log.add_inspection(Tick(t));
        }
        let mut prev = Tick::ZERO;
        for t in 0..50 {
            let lit = log.last_inspection_time_at(Tick(t));
            assert!(lit >= prev);
            prev = lit;
        }
    }

    #[test]
    fn never_inspected_reports_zero() {
        let log = InspectionLog::new();
        assert_eq!(log.last_inspection_time_at(Tick(1_000)), Tick::ZERO);
        assert_eq!(log.next_inspection_time_at(Tick(0)), None);
    }

    #[test]
    fn add_inspection_clears_flag_and_pins_lit() {
        let mut log = InspectionLog::new();
        log.mark_needed(Tick(3));
        assert!(log.needs_inspection());
        log.add_inspection(Tick(7));
        assert!(!log.needs_inspection());
        for t in 7..20 {
            assert_eq!(log.last_inspection_time_at(Tick(t)), Tick(7));
        }
    }

    #[test]
    fn next_inspection_is_earliest_at_or_after() {
        let mut log = InspectionLog::new();
        log.add_inspection(Tick(10));
        log.add_inspection(Tick(25));
        assert_eq!(log.next_inspection_time_at(Tick(0)), Some(Tick(10)));
        assert_eq!(log.next_inspection_time_at(Tick(10)), Some(Tick(10)));
        assert_eq!(log.next_inspection_time_at(Tick(11)), Some(Tick(25)));
        assert_eq!(log.next_inspection_time_at(Tick(26)), None);
    }

    #[test]
    fn mark_needed_records_rising_edge_only() {
        let mut log = InspectionLog::new();
        log.mark_needed(Tick(5));
        log.mark_needed(Tick(6));
        log.mark_needed(Tick(7));
        assert_eq!(log.needed_times(), &[Tick(5)]);
        log.add_inspection(Tick(8));
        log.mark_needed(Tick(9));
        assert_eq!(log.needed_times(), &[Tick(5), Tick(9)]);
    }
}

#[cfg(test)]
mod edge {
    use super::square_net;
    use crate::Inspectable;
    use patrol_core::{AgentId, EdgeId, Tick};

    #[test]
    fn start_map_drives_under_inspection() {
        let mut net = square_net();
        let e = net.edge_mut(EdgeId(0));
        assert!(!e.is_under_inspection());
        e.start_inspection(AgentId(0), Tick(4));
        e.start_inspection(AgentId(1), Tick(9));
        assert!(e.is_under_inspection());
        assert_eq!(e.last_inspection_start(), Some(Tick(9)));
        e.stop_inspection(AgentId(1));
        assert!(e.is_under_inspection());
        e.stop_inspection(AgentId(0));
        assert!(!e.is_under_inspection());
        assert_eq!(e.last_inspection_start(), None);
    }

    #[test]
    fn lit_prefers_active_start_over_completed() {
        let mut net = square_net();
        let e = net.edge_mut(EdgeId(0));
        e.record_inspection(Tick(10));
        assert_eq!(e.lit(Tick(50)), Tick(10));
        e.start_inspection(AgentId(2), Tick(42));
        assert_eq!(e.lit(Tick(50)), Tick(42));
    }

    #[test]
    fn completion_bumps_pheromone_and_decay_restores_it() {
        let mut net = square_net();
        net.complete_edge_inspection(EdgeId(0), AgentId(0), Tick(100));
        assert_eq!(net.edge(EdgeId(0)).pheromone, 1);
        assert!(!net.edge(EdgeId(0)).is_under_inspection());

        let due = Tick(100 + crate::PHEROMONE_DECAY_TICKS);
        net.apply_due_decays(Tick(due.0 - 1));
        assert_eq!(net.edge(EdgeId(0)).pheromone, 1);
        net.apply_due_decays(due);
        assert_eq!(net.edge(EdgeId(0)).pheromone, 0);
    }

    #[test]
    fn negative_risk_is_rejected() {
        let mut net = square_net();
        assert!(net.add_edge(patrol_core::NodeId(1), patrol_core::NodeId(3), -0.5).is_err());
    }
}

#[cfg(test)]
mod graph {
    use super::square_net;
    use patrol_core::{EdgeId, NodeId};

    #[test]
    fn other_end_and_edge_between() {
        let net = square_net();
        assert_eq!(net.other_end(EdgeId(0), NodeId(0)).unwrap(), NodeId(1));
        assert_eq!(net.other_end(EdgeId(0), NodeId(1)).unwrap(), NodeId(0));
        assert!(net.other_end(EdgeId(0), NodeId(2)).is_err());

        assert_eq!(net.edge_between(NodeId(2), NodeId(0)), Some(EdgeId(4)));
        assert_eq!(net.edge_between(NodeId(1), NodeId(3)), None);
    }

    #[test]
    fn total_length_sums_sides_and_diagonal() {
        let net = square_net();
        let expected = 4.0 * 100.0 + (2.0f64).sqrt() * 100.0;
        assert!((net.total_length() - expected).abs() < 1e-9);
    }

    #[test]
    fn degree_counts_incident_edges() {
        let net = square_net();
        assert_eq!(net.degree(NodeId(0)), 3);
        assert_eq!(net.degree(NodeId(1)), 2);
    }
}

#[cfg(test)]
mod loader {
    use crate::loader::{build_network, LoadOptions, NetworkSpec};

    fn parse(json: &str) -> NetworkSpec {
        NetworkSpec::from_json_str(json).unwrap()
    }

    #[test]
    fn near_duplicate_nodes_are_merged() {
        let spec = parse(
            r#"{
              "nodes": [
                {"x": 0, "y": 0},
                {"x": 2, "y": 0, "recharge": true},
                {"x": 100, "y": 0}
              ],
              "edges": [
                {"source": 0, "target": 2},
                {"source": 1, "target": 2}
              ]
            }"#,
        );
        let net = build_network(&spec, &LoadOptions::default()).unwrap();
        // Nodes 0 and 1 collapse; the two edges become one.
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 1);
        // The merged node inherits the recharge flag.
        assert!(net.nodes.iter().any(|n| n.recharge));
    }

    #[test]
    fn self_loops_and_duplicates_are_skipped() {
        let spec = parse(
            r#"{
              "nodes": [{"x": 0, "y": 0}, {"x": 50, "y": 0}],
              "edges": [
                {"source": 0, "target": 0},
                {"source": 0, "target": 1},
                {"source": 1, "target": 0}
              ]
            }"#,
        );
        let net = build_network(&spec, &LoadOptions::default()).unwrap();
        assert_eq!(net.edge_count(), 1);
    }

    #[test]
    fn long_edges_get_recharge_waypoints() {
        let spec = parse(
            r#"{
              "nodes": [{"x": 0, "y": 0}, {"x": 100, "y": 0}],
              "edges": [{"source": 0, "target": 1}]
            }"#,
        );
        let opts = LoadOptions {
            max_segment_length: Some(40.0),
            ..LoadOptions::default()
        };
        let net = build_network(&spec, &opts).unwrap();
        // ceil(100/40) = 3 segments → 2 synthesized waypoints.
        assert_eq!(net.node_count(), 4);
        assert_eq!(net.edge_count(), 3);
        assert_eq!(net.nodes.iter().filter(|n| n.recharge).count(), 2);
        // No segment exceeds the limit.
        assert!(net.edges.iter().all(|e| e.length <= 40.0 + 1e-9));
    }

    #[test]
    fn disconnected_fragment_is_pruned() {
        let spec = parse(
            r#"{
              "nodes": [
                {"x": 0, "y": 0}, {"x": 50, "y": 0}, {"x": 100, "y": 0},
                {"x": 0, "y": 500}, {"x": 50, "y": 500}
              ],
              "edges": [
                {"source": 0, "target": 1},
                {"source": 1, "target": 2},
                {"source": 3, "target": 4}
              ]
            }"#,
        );
        let net = build_network(&spec, &LoadOptions::default()).unwrap();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.edge_count(), 2);
    }

    #[test]
    fn negative_risk_fails_fast() {
        let spec = parse(
            r#"{
              "nodes": [{"x": 0, "y": 0}, {"x": 50, "y": 0}],
              "edges": [{"source": 0, "target": 1, "risk": -1.0}]
            }"#,
        );
        assert!(build_network(&spec, &LoadOptions::default()).is_err());
    }
}

#[cfg(test)]
mod dijkstra {
    use super::square_net;
    use crate::network::{InspectionNetwork, Node};
    use crate::{shortest_distances, shortest_path};
    use patrol_core::{NodeId, Point2};

    #[test]
    fn distances_from_corner() {
        let net = square_net();
        let dist = shortest_distances(&net, NodeId(0));
        assert_eq!(dist[0], 0.0);
        assert_eq!(dist[1], 100.0);
        assert_eq!(dist[3], 100.0);
        // Diagonal beats the two-side detour.
        assert!((dist[2] - (2.0f64).sqrt() * 100.0).abs() < 1e-9);
    }

    #[test]
    fn path_is_inclusive_and_ordered() {
        let net = square_net();
        let path = shortest_path(&net, NodeId(1), NodeId(3)).unwrap();
        assert_eq!(path.first(), Some(&NodeId(1)));
        assert_eq!(path.last(), Some(&NodeId(3)));
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn trivial_path_is_single_node() {
        let net = square_net();
        assert_eq!(
            shortest_path(&net, NodeId(2), NodeId(2)),
            Some(vec![NodeId(2)])
        );
    }

    #[test]
    fn unreachable_target_is_none() {
        let mut net = square_net();
        let lonely = net.add_node(Node::new(Point2::new(900.0, 900.0), false, 0, 1));
        assert!(shortest_path(&net, NodeId(0), lonely).is_none());
        let dist = shortest_distances(&net, NodeId(0));
        assert!(dist[lonely.index()].is_infinite());
    }

    #[test]
    fn fresh_buffers_between_queries() {
        let net = square_net();
        let first = shortest_distances(&net, NodeId(0));
        let _ = shortest_distances(&net, NodeId(2));
        let again = shortest_distances(&net, NodeId(0));
        assert_eq!(first, again);
    }
}
