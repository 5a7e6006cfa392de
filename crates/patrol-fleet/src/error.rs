//! Fleet-subsystem error type.

use thiserror::Error;

use patrol_core::AgentId;
use patrol_nav::NavError;
use patrol_net::NetError;

/// Errors produced by `patrol-fleet`.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("every agent in the fleet has crashed")]
    AllCrashed,

    #[error("{0} not in the fleet roster")]
    AgentNotFound(AgentId),

    #[error("cycle target percentage {0} outside 0..=100")]
    InvalidCycleTarget(f64),

    #[error(transparent)]
    Nav(#[from] NavError),

    #[error(transparent)]
    Net(#[from] NetError),
}

pub type FleetResult<T> = Result<T, FleetError>;
