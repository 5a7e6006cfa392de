//! Inspection network: nodes, edges, adjacency, and the pheromone decay queue.
//!
//! # Data layout
//!
//! Nodes and edges are stored in id-indexed `Vec`s; `adjacency[n]` lists the
//! `EdgeId`s incident to node `n`.  The graph is undirected, so every edge
//! appears in both endpoints' adjacency lists.  Unlike a routing-only graph
//! the entities here carry mutable per-asset state (inspection history,
//! pheromone, active-inspection map), so the layout favors direct indexed
//! mutation over compressed adjacency.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use patrol_core::{AgentId, EdgeId, NodeId, Point2, SimRng, Tick, TICKS_PER_YEAR};

use crate::inspect::{Inspectable, InspectionLog};
use crate::{NetError, NetResult};

/// Ticks after an inspection at which its pheromone contribution decays.
/// One simulated year at 1-minute ticks.
pub const PHEROMONE_DECAY_TICKS: u64 = TICKS_PER_YEAR;

// ── Node ──────────────────────────────────────────────────────────────────────

/// A junction or recharge station in the inspection network.
///
/// Constructed only during network build; never destroyed during a run.
#[derive(Debug, Clone)]
pub struct Node {
    /// Position in survey coordinates.
    pub pos: Point2,
    /// `true` if agents can reset their battery here.
    pub recharge: bool,
    /// Minimum ticks that must elapse between two completed inspections.
    pub min_ticks_between_inspections: u64,
    /// Dwell ticks required to complete one inspection.
    pub inspect_ticks: u64,

    log: InspectionLog,
}

impl Node {
    pub fn new(pos: Point2, recharge: bool, min_between: u64, inspect_ticks: u64) -> Self {
        Self {
            pos,
            recharge,
            min_ticks_between_inspections: min_between,
            inspect_ticks,
            log: InspectionLog::new(),
        }
    }
}

impl Inspectable for Node {
    fn log(&self) -> &InspectionLog {
        &self.log
    }
    fn log_mut(&mut self) -> &mut InspectionLog {
        &mut self.log
    }
    fn time_to_inspect(&self) -> u64 {
        self.inspect_ticks
    }
    fn risk_multiplier(&self) -> f64 {
        1.0
    }
}

// ── Edge ──────────────────────────────────────────────────────────────────────

/// An undirected pipeline segment between two nodes.
///
/// Edges are inspected by traversal: an agent flying the edge registers in the
/// `active` start map and the inspection completes when it finishes dwelling
/// at the far node.
#[derive(Debug, Clone)]
pub struct Edge {
    pub a: NodeId,
    pub b: NodeId,
    /// Relative risk weight, ≥ 0 (validated at build).
    pub risk: f64,
    /// Euclidean length between the endpoint positions, precomputed.
    pub length: f64,
    /// Signed pheromone counter: +1 per completed inspection, −1 per decay.
    pub pheromone: i64,

    /// Agents currently inspecting this edge, with their start ticks.
    active: FxHashMap<AgentId, Tick>,
    log: InspectionLog,
}

impl Edge {
    pub fn new(a: NodeId, b: NodeId, risk: f64, length: f64) -> Self {
        Self {
            a,
            b,
            risk,
            length,
            pheromone: 0,
            active: FxHashMap::default(),
            log: InspectionLog::new(),
        }
    }

    /// `true` while at least one agent has an inspection in progress.
    #[inline]
    pub fn is_under_inspection(&self) -> bool {
        !self.active.is_empty()
    }

    /// Most recent in-progress start tick, or `None` if nobody is inspecting.
    pub fn last_inspection_start(&self) -> Option<Tick> {
        self.active.values().max().copied()
    }

    /// Last-inspection time for staleness scoring: the start of the current
    /// inspection if one is active, else the last *completed* time.
    ///
    /// Treating in-progress starts as "already inspected" keeps two greedy
    /// agents from converging on the same edge.
    pub fn lit(&self, now: Tick) -> Tick {
        self.last_inspection_start()
            .unwrap_or_else(|| self.log.last_inspection_time_at(now))
    }

    /// Register `agent` as inspecting this edge starting at `t`.
    pub fn start_inspection(&mut self, agent: AgentId, t: Tick) {
        self.active.insert(agent, t);
    }

    /// Remove `agent` from the active-inspection map.  Returns the start tick
    /// if the agent was actually inspecting.
    pub fn stop_inspection(&mut self, agent: AgentId) -> Option<Tick> {
        self.active.remove(&agent)
    }
}

impl Inspectable for Edge {
    fn log(&self) -> &InspectionLog {
        &self.log
    }
    fn log_mut(&mut self) -> &mut InspectionLog {
        &mut self.log
    }
    /// Edges are inspected by traversal; the dwell happens at the far node.
    fn time_to_inspect(&self) -> u64 {
        0
    }
    fn risk_multiplier(&self) -> f64 {
        self.risk
    }
}

// ── InspectionNetwork ─────────────────────────────────────────────────────────

/// The full mutable asset graph plus the pheromone decay queue.
///
/// Construct via [`InspectionNetwork::new`] + `add_node`/`add_edge`, or from a
/// file through [`crate::loader`].
pub struct InspectionNetwork {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// `adjacency[n]` = edges incident to node `n`, in insertion order.
    adjacency: Vec<Vec<EdgeId>>,
    /// Pending pheromone decrements, bucketed by due tick.
    decay_queue: BTreeMap<Tick, Vec<EdgeId>>,
}

impl InspectionNetwork {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            adjacency: Vec::new(),
            decay_queue: BTreeMap::new(),
        }
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Add a node and return its id (sequential from 0).
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.adjacency.push(Vec::new());
        id
    }

    /// Add an undirected edge between `a` and `b`.
    ///
    /// Fails on a negative risk multiplier or an out-of-range endpoint; the
    /// length is computed from the endpoint positions.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, risk: f64) -> NetResult<EdgeId> {
        let index = self.edges.len();
        if risk < 0.0 {
            return Err(NetError::InvalidRisk { index, risk });
        }
        for endpoint in [a, b] {
            if endpoint.index() >= self.nodes.len() {
                return Err(NetError::EndpointOutOfRange {
                    index,
                    endpoint: endpoint.index(),
                });
            }
        }
        let length = self.nodes[a.index()].pos.distance(self.nodes[b.index()].pos);
        let id = EdgeId(index as u32);
        self.edges.push(Edge::new(a, b, risk, length));
        self.adjacency[a.index()].push(id);
        self.adjacency[b.index()].push(id);
        Ok(id)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    #[inline]
    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.index()]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Edges incident to `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> &[EdgeId] {
        &self.adjacency[node.index()]
    }

    /// Degree of `node`.
    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node.index()].len()
    }

    /// The endpoint of `edge` that is not `node`.
    ///
    /// Fails if `node` is not an endpoint of `edge`.
    pub fn other_end(&self, edge: EdgeId, node: NodeId) -> NetResult<NodeId> {
        let e = self.edge(edge);
        if e.a == node {
            Ok(e.b)
        } else if e.b == node {
            Ok(e.a)
        } else {
            Err(NetError::NodeNotOnEdge { node, edge })
        }
    }

    /// The edge connecting `a` and `b`, if any.
    pub fn edge_between(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.adjacency[a.index()]
            .iter()
            .copied()
            .find(|&e| {
                let edge = self.edge(e);
                (edge.a == a && edge.b == b) || (edge.a == b && edge.b == a)
            })
    }

    /// Sum of all edge lengths.
    pub fn total_length(&self) -> f64 {
        self.edges.iter().map(|e| e.length).sum()
    }

    /// Axis-aligned bounding extent of all node positions: `(max_x, max_y)`.
    pub fn bounding_extent(&self) -> (f64, f64) {
        let max_x = self.nodes.iter().map(|n| n.pos.x).fold(0.0, f64::max);
        let max_y = self.nodes.iter().map(|n| n.pos.y).fold(0.0, f64::max);
        (max_x, max_y)
    }

    // ── Random selection ──────────────────────────────────────────────────

    /// Uniformly random node id.  `None` on an empty network.
    pub fn random_node(&self, rng: &mut SimRng) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(NodeId(rng.gen_range(0..self.nodes.len() as u32)))
    }

    /// Uniformly random edge id.  `None` if the network has no edges.
    pub fn random_edge(&self, rng: &mut SimRng) -> Option<EdgeId> {
        if self.edges.is_empty() {
            return None;
        }
        Some(EdgeId(rng.gen_range(0..self.edges.len() as u32)))
    }

    // ── Inspection bookkeeping ────────────────────────────────────────────

    /// Complete `agent`'s inspection of `edge` at tick `now`.
    ///
    /// Removes the agent from the active map, records the completion, bumps
    /// the pheromone counter, and schedules one matching decrement at
    /// `now + PHEROMONE_DECAY_TICKS`.
    pub fn complete_edge_inspection(&mut self, edge: EdgeId, agent: AgentId, now: Tick) {
        let e = &mut self.edges[edge.index()];
        e.stop_inspection(agent);
        e.record_inspection(now);
        e.pheromone += 1;
        self.decay_queue
            .entry(now.offset(PHEROMONE_DECAY_TICKS))
            .or_default()
            .push(edge);
    }

    /// Apply every pheromone decrement whose due tick is ≤ `now`.
    pub fn apply_due_decays(&mut self, now: Tick) {
        let mut still_pending = self.decay_queue.split_off(&now.offset(1));
        std::mem::swap(&mut self.decay_queue, &mut still_pending);
        for (_, edges) in still_pending {
            for edge in edges {
                self.edges[edge.index()].pheromone -= 1;
            }
        }
    }
}

impl Default for InspectionNetwork {
    fn default() -> Self {
        Self::new()
    }
}
