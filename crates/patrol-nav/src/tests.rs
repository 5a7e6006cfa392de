//! Unit tests for the navigation strategies.

use patrol_core::{AgentId, AgentRng, NodeId, Point2, Tick};
use patrol_net::network::{InspectionNetwork, Node};

use crate::strategy::NavCtx;

/// Triangle: 0-1-2-0, sides 100 / 100 / ~141.
fn triangle_net() -> InspectionNetwork {
    let mut net = InspectionNetwork::new();
    for (x, y) in [(0.0, 0.0), (100.0, 0.0), (0.0, 100.0)] {
        net.add_node(Node::new(Point2::new(x, y), false, 0, 1));
    }
    for (a, b) in [(0, 1), (1, 2), (2, 0)] {
        net.add_edge(NodeId(a), NodeId(b), 1.0).unwrap();
    }
    net
}

fn test_rng() -> AgentRng {
    AgentRng::new(7, AgentId(0))
}

fn ctx<'a>(
    net: &'a InspectionNetwork,
    now: Tick,
    rng: &'a mut AgentRng,
) -> NavCtx<'a> {
    NavCtx {
        net,
        now,
        rng,
        max_flight_distance: 1_000.0,
    }
}

#[cfg(test)]
mod postman {
    use super::triangle_net;
    use crate::postman::closed_walk;
    use patrol_core::{NodeId, Point2};
    use patrol_net::network::{InspectionNetwork, Node};

    fn assert_valid_tour(net: &InspectionNetwork, walk: &[NodeId], start: NodeId) {
        assert_eq!(walk.first(), Some(&start));
        assert_eq!(walk.last(), Some(&start));
        let mut covered = vec![false; net.edge_count()];
        for pair in walk.windows(2) {
            let e = net
                .edge_between(pair[0], pair[1])
                .unwrap_or_else(|| panic!("walk leg {}→{} has no edge", pair[0], pair[1]));
            covered[e.index()] = true;
        }
        assert!(covered.iter().all(|&c| c), "tour missed an edge");
    }

    #[test]
    fn eulerian_network_is_toured_without_duplication() {
        let net = triangle_net();
        let walk = closed_walk(&net, NodeId(0)).unwrap();
        assert_valid_tour(&net, &walk, NodeId(0));
        // All degrees even: exactly one leg per edge.
        assert_eq!(walk.len(), net.edge_count() + 1);
    }

    #[test]
    fn odd_degree_network_duplicates_cheapest_arcs() {
        // Path 0-1-2: both ends odd; the tour must retrace.
        let mut net = InspectionNetwork::new();
        for x in [0.0, 100.0, 200.0] {
            net.add_node(Node::new(Point2::new(x, 0.0), false, 0, 1));
        }
        net.add_edge(NodeId(0), NodeId(1), 1.0).unwrap();
        net.add_edge(NodeId(1), NodeId(2), 1.0).unwrap();

        let walk = closed_walk(&net, NodeId(0)).unwrap();
        assert_valid_tour(&net, &walk, NodeId(0));
        // Each edge flown exactly twice (there and back).
        assert_eq!(walk.len(), 5);
    }

    #[test]
    fn edgeless_network_is_fatal() {
        let mut net = InspectionNetwork::new();
        net.add_node(Node::new(Point2::new(0.0, 0.0), false, 0, 1));
        assert!(closed_walk(&net, NodeId(0)).is_err());
    }
}

#[cfg(test)]
mod cycle {
    use super::{ctx, test_rng, triangle_net};
    use crate::cycle::{CycleNav, CycleTour};
    use crate::strategy::NavStrategy;
    use patrol_core::{NodeId, Tick};

    #[test]
    fn lap_length_stabilizes_after_first_wrap() {
        let net = triangle_net();
        let tour = CycleTour::compute(&net, NodeId(0)).unwrap();
        let mut nav = CycleNav::new(tour, 0).unwrap();
        let mut rng = test_rng();

        let mut current = nav.start_location(&net, &mut rng).unwrap();
        assert_eq!(current, NodeId(0));

        // Drive leg-by-leg, 10 ticks per leg.
        let mut now = Tick(0);
        let mut wrap_ticks = Vec::new();
        for step in 0..9 {
            now = Tick(step * 10);
            let mut c = ctx(&net, now, &mut rng);
            let leg = nav.next_destination(&mut c, current).unwrap();
            current = leg.node;
            if let Some(s) = nav.steps_in_cycle() {
                wrap_ticks.push(s);
            }
        }
        // One lap = 3 legs = 30 ticks; fixed after the first measurement.
        assert!(!wrap_ticks.is_empty());
        assert!(wrap_ticks.iter().all(|&s| s == 30));
    }

    #[test]
    fn staggered_start_offsets_entry_point() {
        let net = triangle_net();
        let tour = CycleTour::compute(&net, NodeId(0)).unwrap();
        let mut a = CycleNav::new(tour.clone(), 0).unwrap();
        let mut b = CycleNav::new(tour, 1).unwrap();
        let mut rng = test_rng();
        let start_a = a.start_location(&net, &mut rng).unwrap();
        let start_b = b.start_location(&net, &mut rng).unwrap();
        assert_ne!(start_a, start_b);
    }
}

#[cfg(test)]
mod lni {
    use super::{ctx, test_rng, triangle_net};
    use crate::lni::{GreedyLni, InterUavLni};
    use crate::location::EdgeNodeLocation;
    use crate::strategy::{Job, NavStrategy};
    use patrol_core::{AgentId, EdgeId, NodeId, Tick};
    use patrol_net::{EntityRef, Inspectable};

    #[test]
    fn greedy_picks_never_inspected_edge() {
        let mut net = triangle_net();
        // From node 0 the candidates are edges 0 (to 1) and 2 (to 2).
        net.edge_mut(EdgeId(0)).record_inspection(Tick(40));
        let mut nav = GreedyLni::new(false);
        let mut rng = test_rng();
        let mut c = ctx(&net, Tick(50), &mut rng);
        let leg = nav.next_destination(&mut c, NodeId(0)).unwrap();
        assert_eq!(leg.edge, Some(EdgeId(2)));
    }

    #[test]
    fn greedy_prefers_oldest_active_start() {
        let mut net = triangle_net();
        net.edge_mut(EdgeId(0)).start_inspection(AgentId(1), Tick(10));
        net.edge_mut(EdgeId(2)).start_inspection(AgentId(2), Tick(30));
        let mut nav = GreedyLni::new(false);
        let mut rng = test_rng();
        let mut c = ctx(&net, Tick(50), &mut rng);
        let leg = nav.next_destination(&mut c, NodeId(0)).unwrap();
        assert_eq!(leg.edge, Some(EdgeId(0)));
    }

    #[test]
    fn coordinated_accepts_adjacent_forced_path() {
        let net = triangle_net();
        let mut nav = GreedyLni::new(true);
        let current = EdgeNodeLocation::hold(NodeId(0));
        let path = vec![
            EdgeNodeLocation::new(&net, EdgeId(0), NodeId(1)).unwrap(),
            EdgeNodeLocation::new(&net, EdgeId(1), NodeId(2)).unwrap(),
        ];
        assert!(nav.accept_forced_path(&net, Some(&current), path.clone()));
        assert_eq!(nav.current_job(), Job::InspectingOnCommand);

        // The forced legs replay in order, then the job resets.
        let mut rng = test_rng();
        let mut c = ctx(&net, Tick(0), &mut rng);
        assert_eq!(nav.next_destination(&mut c, NodeId(0)).unwrap(), path[0]);
        assert_eq!(nav.next_destination(&mut c, NodeId(1)).unwrap(), path[1]);
        assert_eq!(nav.current_job(), Job::Monitoring);
    }

    #[test]
    fn coordinated_rejects_disconnected_first_leg() {
        let net = triangle_net();
        let mut nav = GreedyLni::new(true);
        // Agent is headed to node 1 but the path departs from node 2.
        let current = EdgeNodeLocation::hold(NodeId(1));
        let path = vec![EdgeNodeLocation::new(&net, EdgeId(2), NodeId(0)).unwrap()];
        assert!(!nav.accept_forced_path(&net, Some(&current), path));
        assert_eq!(nav.current_job(), Job::Monitoring);
    }

    #[test]
    fn uncoordinated_rejects_everything() {
        let net = triangle_net();
        let mut nav = GreedyLni::new(false);
        let path = vec![EdgeNodeLocation::new(&net, EdgeId(0), NodeId(1)).unwrap()];
        assert!(!nav.accept_forced_path(&net, None, path));
    }

    #[test]
    fn broadcast_updates_steer_away() {
        let net = triangle_net();
        let mut nav = InterUavLni::new();
        assert!(nav.announces());
        // A peer reports edge 0 as freshly inspected.
        nav.observe_inspection(EntityRef::Edge(EdgeId(0)), Tick(90));
        let mut rng = test_rng();
        let mut c = ctx(&net, Tick(100), &mut rng);
        let leg = nav.next_destination(&mut c, NodeId(0)).unwrap();
        assert_eq!(leg.edge, Some(EdgeId(2)));
    }
}

#[cfg(test)]
mod lookahead {
    use super::{ctx, test_rng};
    use crate::lookahead::Lookahead;
    use crate::strategy::NavStrategy;
    use patrol_core::{EdgeId, NodeId, Point2, Tick};
    use patrol_net::network::{InspectionNetwork, Node};
    use patrol_net::Inspectable;

    /// Node 0 with two spurs: 0-1-2 (chain) and 0-3-4 (chain).
    fn two_spurs() -> InspectionNetwork {
        let mut net = InspectionNetwork::new();
        let coords = [
            (0.0, 0.0),
            (100.0, 0.0),
            (200.0, 0.0),
            (-100.0, 0.0),
            (-200.0, 0.0),
        ];
        for (x, y) in coords {
            net.add_node(Node::new(Point2::new(x, y), false, 0, 1));
        }
        for (a, b) in [(0, 1), (1, 2), (0, 3), (3, 4)] {
            net.add_edge(NodeId(a), NodeId(b), 1.0).unwrap();
        }
        net
    }

    #[test]
    fn far_side_freshness_penalizes_a_spur() {
        let mut net = two_spurs();
        // Both first legs equally stale, but the right spur's continuation
        // (edge 1) was just inspected.
        net.edge_mut(EdgeId(1)).record_inspection(Tick(95));
        let mut nav = Lookahead::new(false);
        let mut rng = test_rng();
        let mut c = ctx(&net, Tick(100), &mut rng);
        let leg = nav.next_destination(&mut c, NodeId(0)).unwrap();
        assert_eq!(leg.edge, Some(EdgeId(2)), "should take the left spur");
    }

    #[test]
    fn rooted_variant_agrees_on_the_clear_case() {
        let mut net = two_spurs();
        net.edge_mut(EdgeId(1)).record_inspection(Tick(95));
        let mut nav = Lookahead::new(true);
        let mut rng = test_rng();
        let mut c = ctx(&net, Tick(100), &mut rng);
        let leg = nav.next_destination(&mut c, NodeId(0)).unwrap();
        assert_eq!(leg.edge, Some(EdgeId(2)));
    }
}

#[cfg(test)]
mod aco {
    use super::{ctx, test_rng, triangle_net};
    use crate::aco::{AcoHeuristic, AcoNav, DEFAULT_ALPHA, DEFAULT_BETA};
    use crate::strategy::NavStrategy;
    use patrol_core::{EdgeId, NodeId, Tick};
    use patrol_net::Inspectable;

    #[test]
    fn zero_staleness_candidates_cannot_win() {
        let mut net = triangle_net();
        // Edge 0 inspected right now → staleness 0 → weight 0.
        net.edge_mut(EdgeId(0)).record_inspection(Tick(100));
        let mut nav = AcoNav::new(DEFAULT_ALPHA, DEFAULT_BETA, AcoHeuristic::Lni);
        let mut rng = test_rng();
        for _ in 0..20 {
            let mut c = ctx(&net, Tick(100), &mut rng);
            let leg = nav.next_destination(&mut c, NodeId(0)).unwrap();
            assert_eq!(leg.edge, Some(EdgeId(2)));
        }
    }

    #[test]
    fn all_zero_weights_fall_back_to_last_candidate() {
        let mut net = triangle_net();
        net.edge_mut(EdgeId(0)).record_inspection(Tick(100));
        net.edge_mut(EdgeId(2)).record_inspection(Tick(100));
        let mut nav = AcoNav::new(DEFAULT_ALPHA, DEFAULT_BETA, AcoHeuristic::Lni);
        let mut rng = test_rng();
        let mut c = ctx(&net, Tick(100), &mut rng);
        let leg = nav.next_destination(&mut c, NodeId(0)).unwrap();
        // Candidates at node 0 are [edge 0, edge 2]; the last one wins.
        assert_eq!(leg.edge, Some(EdgeId(2)));
    }

    #[test]
    fn neighbour_heuristic_sees_past_the_far_node() {
        let net = triangle_net();
        let mut nav = AcoNav::new(DEFAULT_ALPHA, DEFAULT_BETA, AcoHeuristic::LniNeighbour);
        let mut rng = test_rng();
        let mut c = ctx(&net, Tick(100), &mut rng);
        // Smoke: fully stale network, any edge is legal.
        let leg = nav.next_destination(&mut c, NodeId(0)).unwrap();
        assert!(leg.edge.is_some());
    }
}

#[cfg(test)]
mod path_plan {
    use super::{ctx, test_rng};
    use crate::path_plan::{PathPlanNav, PathScoring};
    use crate::strategy::{NavCtx, NavStrategy};
    use crate::NavError;
    use patrol_core::{AgentId, EdgeId, NodeId, Point2, Tick};
    use patrol_net::network::{InspectionNetwork, Node};

    /// Line of recharge nodes 0-1-2-3, 100 apart.
    fn recharge_line() -> InspectionNetwork {
        let mut net = InspectionNetwork::new();
        for x in [0.0, 100.0, 200.0, 300.0] {
            net.add_node(Node::new(Point2::new(x, 0.0), true, 0, 1));
        }
        for (a, b) in [(0, 1), (1, 2), (2, 3)] {
            net.add_edge(NodeId(a), NodeId(b), 1.0).unwrap();
        }
        net
    }

    #[test]
    fn commits_to_a_path_and_replays_it() {
        let net = recharge_line();
        let mut nav = PathPlanNav::new(PathScoring::MinStale);
        let mut rng = test_rng();
        let mut c = ctx(&net, Tick(10), &mut rng);
        let first = nav.next_destination(&mut c, NodeId(0)).unwrap();
        // Whole-path commitment: successive calls walk the same plan.
        assert_eq!(first.node, NodeId(1));
        let mut c = ctx(&net, Tick(20), &mut rng);
        let second = nav.next_destination(&mut c, NodeId(1)).unwrap();
        assert_eq!(second.node, NodeId(2));
    }

    #[test]
    fn no_recharge_in_range_is_fatal() {
        let mut net = InspectionNetwork::new();
        net.add_node(Node::new(Point2::new(0.0, 0.0), false, 0, 1));
        net.add_node(Node::new(Point2::new(100.0, 0.0), false, 0, 1));
        net.add_edge(NodeId(0), NodeId(1), 1.0).unwrap();

        let mut nav = PathPlanNav::new(PathScoring::MinStale);
        let mut rng = test_rng();
        let mut c = ctx(&net, Tick(0), &mut rng);
        let err = nav.next_destination(&mut c, NodeId(0)).unwrap_err();
        assert!(matches!(err, NavError::NoRechargeReachable(_)));
    }

    #[test]
    fn range_budget_excludes_distant_recharge_nodes() {
        let net = recharge_line();
        let mut nav = PathPlanNav::new(PathScoring::MinStale);
        let mut rng = test_rng();
        // Budget 0.9 × 120 = 108: only node 1 is reachable from node 0.
        let mut c = NavCtx {
            net: &net,
            now: Tick(0),
            rng: &mut rng,
            max_flight_distance: 120.0,
        };
        let leg = nav.next_destination(&mut c, NodeId(0)).unwrap();
        assert_eq!(leg.node, NodeId(1));
    }

    #[test]
    fn foreign_inspection_aborts_committed_plan() {
        let net = recharge_line();
        let mut nav = PathPlanNav::new(PathScoring::SumSquares);
        let mut rng = test_rng();
        let mut c = ctx(&net, Tick(10), &mut rng);
        let _ = nav.next_destination(&mut c, NodeId(0)).unwrap();

        // Another agent claims the whole line's stalest stretch.
        let mut net = net;
        net.edge_mut(EdgeId(1)).start_inspection(AgentId(9), Tick(11));
        net.edge_mut(EdgeId(2)).start_inspection(AgentId(9), Tick(11));
        let mut c = ctx(&net, Tick(12), &mut rng);
        // Replanned rather than continuing into a claimed edge.
        let leg = nav.next_destination(&mut c, NodeId(1)).unwrap();
        assert!(leg.edge.is_some());
    }

    #[test]
    fn strict_scoring_ignores_activity() {
        let mut net = recharge_line();
        net.edge_mut(EdgeId(0)).start_inspection(AgentId(3), Tick(5));
        let mut nav = PathPlanNav::new(PathScoring::MinStaleStrict);
        let mut rng = test_rng();
        let mut c = ctx(&net, Tick(10), &mut rng);
        // Still plans straight through the active edge.
        let leg = nav.next_destination(&mut c, NodeId(0)).unwrap();
        assert_eq!(leg.edge, Some(EdgeId(0)));
    }
}

#[cfg(test)]
mod registry {
    use crate::aco::AcoHeuristic;
    use crate::registry::StrategySpec;
    use crate::{DEFAULT_ALPHA, DEFAULT_BETA};

    #[test]
    fn names_resolve() {
        for name in [
            "cycle",
            "greedy_lni",
            "coordinated_lni",
            "inter_uav_lni",
            "individual_lni",
            "lookahead",
            "rooted_lookahead",
            "aco",
            "path_plan",
            "random",
        ] {
            assert!(name.parse::<StrategySpec>().is_ok(), "{name}");
        }
        assert!("flood_fill".parse::<StrategySpec>().is_err());
    }

    #[test]
    fn aco_json_defaults_apply() {
        let spec: StrategySpec =
            serde_json::from_str(r#"{"strategy": "aco", "heuristic": "lni"}"#).unwrap();
        assert_eq!(
            spec,
            StrategySpec::Aco {
                alpha: DEFAULT_ALPHA,
                beta: DEFAULT_BETA,
                heuristic: AcoHeuristic::Lni,
            }
        );
    }

    #[test]
    fn cycle_requires_a_tour() {
        let spec = StrategySpec::Cycle;
        assert!(spec.needs_tour());
        assert!(spec.build(None, 0).is_err());
    }

    #[test]
    fn non_cycle_builds_without_tour() {
        for name in ["greedy_lni", "random", "path_plan_strict", "aco_neighbour"] {
            let spec: StrategySpec = name.parse().unwrap();
            assert!(spec.build(None, 0).is_ok());
        }
    }
}
