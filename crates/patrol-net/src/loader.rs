//! Network file loading and graph construction.
//!
//! Survey files are JSON: a list of node positions (with optional recharge
//! flags) and a list of edges by node index.  Real survey exports are messy,
//! so construction cleans as it builds:
//!
//! 1. Nodes closer than [`LoadOptions::merge_radius`] are merged into one
//!    (nearest-neighbour query over an R-tree); a merged node is
//!    recharge-capable if any constituent was.
//! 2. Self-loops and duplicate edges are skipped.
//! 3. With `max_segment_length` set, edges longer than the limit get evenly
//!    spaced intermediate recharge nodes so agents can always make the hop.
//! 4. Everything outside the largest connected component is pruned
//!    (iterative BFS; disconnected fragments would strand agents).

use rstar::primitives::GeomWithData;
use rstar::RTree;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

use patrol_core::{NodeId, Point2};
use rustc_hash::FxHashSet;

use crate::network::{InspectionNetwork, Node};
use crate::{NetError, NetResult};

// ── File schema ───────────────────────────────────────────────────────────────

fn default_risk() -> f64 {
    1.0
}

/// One node entry in a survey file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSpec {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub recharge: bool,
}

/// One edge entry in a survey file, endpoints as indices into `nodes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub source: usize,
    pub target: usize,
    #[serde(default = "default_risk")]
    pub risk: f64,
}

/// The parsed survey file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
}

impl NetworkSpec {
    pub fn from_json_str(json: &str) -> NetResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> NetResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

// ── LoadOptions ───────────────────────────────────────────────────────────────

/// Construction parameters for [`build_network`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Nodes closer than this are merged.  Default: 5 survey units.
    pub merge_radius: f64,
    /// When set, edges longer than this get synthesized intermediate recharge
    /// nodes.  Callers derive it from agent flight range × a safety factor.
    pub max_segment_length: Option<f64>,
    /// Minimum ticks between two inspections of the same node.
    pub min_ticks_between_inspections: u64,
    /// Dwell ticks per node inspection.
    pub inspect_ticks: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            merge_radius: 5.0,
            max_segment_length: None,
            min_ticks_between_inspections: 0,
            inspect_ticks: 1,
        }
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

struct RawNode {
    pos: Point2,
    recharge: bool,
}

struct RawEdge {
    a: usize,
    b: usize,
    risk: f64,
}

/// Build an [`InspectionNetwork`] from a parsed survey file.
pub fn build_network(spec: &NetworkSpec, opts: &LoadOptions) -> NetResult<InspectionNetwork> {
    let mut nodes: Vec<RawNode> = Vec::with_capacity(spec.nodes.len());
    let mut tree: RTree<GeomWithData<[f64; 2], usize>> = RTree::new();

    // 1. Merge near-duplicate survey points.
    let mut remap = Vec::with_capacity(spec.nodes.len());
    for n in &spec.nodes {
        let p = [n.x, n.y];
        let merged = tree
            .nearest_neighbor(&p)
            .filter(|e| {
                let dx = e.geom()[0] - n.x;
                let dy = e.geom()[1] - n.y;
                (dx * dx + dy * dy).sqrt() < opts.merge_radius
            })
            .map(|e| e.data);
        match merged {
            Some(id) => {
                nodes[id].recharge |= n.recharge;
                remap.push(id);
            }
            None => {
                let id = nodes.len();
                nodes.push(RawNode {
                    pos: Point2::new(n.x, n.y),
                    recharge: n.recharge,
                });
                tree.insert(GeomWithData::new(p, id));
                remap.push(id);
            }
        }
    }

    // 2. Remap edges; drop self-loops and duplicates.
    let mut edges: Vec<RawEdge> = Vec::with_capacity(spec.edges.len());
    let mut seen: FxHashSet<(usize, usize)> = FxHashSet::default();
    for (index, e) in spec.edges.iter().enumerate() {
        if e.risk < 0.0 {
            return Err(NetError::InvalidRisk { index, risk: e.risk });
        }
        for endpoint in [e.source, e.target] {
            if endpoint >= remap.len() {
                return Err(NetError::EndpointOutOfRange { index, endpoint });
            }
        }
        let a = remap[e.source];
        let b = remap[e.target];
        if a == b {
            continue;
        }
        if !seen.insert((a.min(b), a.max(b))) {
            continue;
        }
        edges.push(RawEdge { a, b, risk: e.risk });
    }

    // 3. Split over-length edges with evenly spaced recharge waypoints.
    if let Some(max_len) = opts.max_segment_length {
        let mut split: Vec<RawEdge> = Vec::with_capacity(edges.len());
        for e in edges {
            let length = nodes[e.a].pos.distance(nodes[e.b].pos);
            let segments = (length / max_len).ceil().max(1.0) as usize;
            if segments == 1 {
                split.push(e);
                continue;
            }
            let start = nodes[e.a].pos;
            let end = nodes[e.b].pos;
            let mut prev = e.a;
            for i in 1..segments {
                let f = i as f64 / segments as f64;
                let pos = Point2::new(
                    start.x + (end.x - start.x) * f,
                    start.y + (end.y - start.y) * f,
                );
                let id = nodes.len();
                nodes.push(RawNode { pos, recharge: true });
                split.push(RawEdge { a: prev, b: id, risk: e.risk });
                prev = id;
            }
            split.push(RawEdge { a: prev, b: e.b, risk: e.risk });
        }
        edges = split;
    }

    // 4. Keep only the largest connected component.
    let keep = largest_component(nodes.len(), &edges);

    let mut final_id = vec![usize::MAX; nodes.len()];
    let mut net = InspectionNetwork::new();
    for (i, n) in nodes.iter().enumerate() {
        if keep[i] {
            let id = net.add_node(Node::new(
                n.pos,
                n.recharge,
                opts.min_ticks_between_inspections,
                opts.inspect_ticks,
            ));
            final_id[i] = id.index();
        }
    }
    for e in &edges {
        if keep[e.a] && keep[e.b] {
            net.add_edge(
                NodeId(final_id[e.a] as u32),
                NodeId(final_id[e.b] as u32),
                e.risk,
            )?;
        }
    }

    if net.is_empty() {
        return Err(NetError::EmptyNetwork);
    }
    Ok(net)
}

/// Mark the nodes belonging to the largest connected component.
fn largest_component(node_count: usize, edges: &[RawEdge]) -> Vec<bool> {
    let mut adjacency = vec![Vec::new(); node_count];
    for e in edges {
        adjacency[e.a].push(e.b);
        adjacency[e.b].push(e.a);
    }

    let mut component = vec![usize::MAX; node_count];
    let mut sizes = Vec::new();
    let mut queue = VecDeque::new();
    for start in 0..node_count {
        if component[start] != usize::MAX {
            continue;
        }
        let id = sizes.len();
        let mut size = 0usize;
        component[start] = id;
        queue.push_back(start);
        while let Some(n) = queue.pop_front() {
            size += 1;
            for &m in &adjacency[n] {
                if component[m] == usize::MAX {
                    component[m] = id;
                    queue.push_back(m);
                }
            }
        }
        sizes.push(size);
    }

    let largest = sizes
        .iter()
        .enumerate()
        .max_by_key(|&(_, s)| s)
        .map(|(i, _)| i)
        .unwrap_or(0);
    component.into_iter().map(|c| c == largest).collect()
}
