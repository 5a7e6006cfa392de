//! Network-subsystem error type.

use thiserror::Error;

use patrol_core::{EdgeId, NodeId};

/// Errors produced by `patrol-net`.
#[derive(Debug, Error)]
pub enum NetError {
    #[error("edge {index} has negative risk multiplier {risk}")]
    InvalidRisk { index: usize, risk: f64 },

    #[error("edge {index} references node {endpoint} outside the node list")]
    EndpointOutOfRange { index: usize, endpoint: usize },

    #[error("{node} is not an endpoint of {edge}")]
    NodeNotOnEdge { node: NodeId, edge: EdgeId },

    #[error("network has no nodes after construction")]
    EmptyNetwork,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("network file parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type NetResult<T> = Result<T, NetError>;
