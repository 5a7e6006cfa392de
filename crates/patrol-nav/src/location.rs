//! Destination addressing: an edge to traverse and the node to arrive at.

use patrol_core::{EdgeId, NodeId};
use patrol_net::InspectionNetwork;

use crate::{NavError, NavResult};

/// One leg of an agent's plan: fly edge `edge` and arrive at node `node`.
///
/// `edge == None` means "hold position at `node`" — used for start placement
/// and for forced paths that begin at the agent's current target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EdgeNodeLocation {
    pub edge: Option<EdgeId>,
    pub node: NodeId,
}

impl EdgeNodeLocation {
    /// A leg traversing `edge` toward `node`.  Validates that `node` actually
    /// is an endpoint of `edge`.
    pub fn new(net: &InspectionNetwork, edge: EdgeId, node: NodeId) -> NavResult<Self> {
        let e = net.edge(edge);
        if e.a != node && e.b != node {
            return Err(NavError::InvalidLocation { edge, node });
        }
        Ok(Self { edge: Some(edge), node })
    }

    /// Hold position at `node` without traversing anything.
    pub fn hold(node: NodeId) -> Self {
        Self { edge: None, node }
    }
}

impl std::fmt::Display for EdgeNodeLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.edge {
            Some(e) => write!(f, "{} via {}", self.node, e),
            None => write!(f, "hold at {}", self.node),
        }
    }
}
