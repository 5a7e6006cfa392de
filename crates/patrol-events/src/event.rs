//! Event records fed into the simulation's tick loop.

use patrol_core::{EdgeId, NodeId, Tick};
use serde::{Deserialize, Serialize};

/// What a fired event asks the simulation to do.
///
/// `None` targets are placeholders resolved to a random entity at fire time,
/// so a generator can schedule "inspect something" without pinning the asset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Request an on-demand inspection of an edge.
    EdgeInspection(Option<EdgeId>),
    /// Request an on-demand inspection of a node.
    NodeInspection(Option<NodeId>),
    /// Knock out a random active agent for `downtime` ticks.
    Failure { downtime: u64 },
}

/// A scheduled occurrence: at `tick`, do `kind`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub tick: Tick,
    pub kind: EventKind,
}

impl Event {
    pub fn new(tick: Tick, kind: EventKind) -> Self {
        Self { tick, kind }
    }
}
