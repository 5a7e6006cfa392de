//! Navigation-subsystem error type.

use thiserror::Error;

use patrol_core::{EdgeId, NodeId};
use patrol_net::NetError;

/// Errors produced by `patrol-nav`.
///
/// All of these are fatal for the owning agent: a strategy that cannot pick a
/// next destination has no safe continuation, which is a configuration
/// problem, not a recoverable runtime state.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("{0} has no outgoing edges")]
    DeadEnd(NodeId),

    #[error("no recharge node reachable within flight range from {0}")]
    NoRechargeReachable(NodeId),

    #[error("{node} is not an endpoint of {edge}")]
    InvalidLocation { edge: EdgeId, node: NodeId },

    #[error("cycle strategy selected but no tour was computed")]
    MissingTour,

    #[error("cannot pick a start location on an empty network")]
    EmptyNetwork,

    #[error("unknown strategy name: {0}")]
    UnknownStrategy(String),

    #[error(transparent)]
    Net(#[from] NetError),
}

pub type NavResult<T> = Result<T, NavError>;
