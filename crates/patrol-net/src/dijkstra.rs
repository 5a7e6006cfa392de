//! Single-source shortest paths over the inspection network.
//!
//! Edge cost is physical length, so distances are in survey units and can be
//! compared directly against battery flight ranges.
//!
//! Every query allocates fresh `dist`/`prev` buffers, so no state can leak
//! from one query into the next.  The heap breaks cost ties by node id for
//! deterministic expansion order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use patrol_core::NodeId;

use crate::network::InspectionNetwork;

// ── Heap entry ────────────────────────────────────────────────────────────────

/// Min-heap entry: smallest cost first, node id as deterministic tie-break.
struct HeapEntry {
    cost: f64,
    node: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (a max-heap) pops the cheapest entry.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

/// Shortest distance from `source` to every node.
///
/// Unreachable nodes are `f64::INFINITY`.
pub fn shortest_distances(net: &InspectionNetwork, source: NodeId) -> Vec<f64> {
    let (dist, _) = run(net, source, None);
    dist
}

/// Shortest path from `source` to `target` as an inclusive node sequence.
///
/// `Some(vec![source])` when `source == target`; `None` if unreachable.
pub fn shortest_path(
    net: &InspectionNetwork,
    source: NodeId,
    target: NodeId,
) -> Option<Vec<NodeId>> {
    let (dist, prev) = run(net, source, Some(target));
    if dist[target.index()].is_infinite() {
        return None;
    }
    let mut path = vec![target];
    let mut cur = target;
    while cur != source {
        cur = prev[cur.index()];
        path.push(cur);
    }
    path.reverse();
    Some(path)
}

fn run(
    net: &InspectionNetwork,
    source: NodeId,
    target: Option<NodeId>,
) -> (Vec<f64>, Vec<NodeId>) {
    let n = net.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev = vec![NodeId::INVALID; n];
    dist[source.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry { cost: 0.0, node: source });

    while let Some(HeapEntry { cost, node }) = heap.pop() {
        if Some(node) == target {
            break;
        }
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }
        for &edge in net.out_edges(node) {
            let e = net.edge(edge);
            let neighbor = if e.a == node { e.b } else { e.a };
            let new_cost = cost + e.length;
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = node;
                heap.push(HeapEntry { cost: new_cost, node: neighbor });
            }
        }
    }

    (dist, prev)
}
