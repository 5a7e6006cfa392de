//! Simulation-level error type.
//!
//! Wraps every subsystem error so callers deal with one `Result` shape; the
//! two local variants are configuration problems caught before any state is
//! runnable.

use thiserror::Error;

use patrol_events::EventError;
use patrol_fleet::FleetError;
use patrol_nav::NavError;
use patrol_net::NetError;
use patrol_sla::SlaError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("at least one of the node/edge SLA intervals must be positive")]
    NoSlaIntervals,

    #[error("a simulation needs at least one agent")]
    NoAgents,

    #[error(transparent)]
    Net(#[from] NetError),

    #[error(transparent)]
    Nav(#[from] NavError),

    #[error(transparent)]
    Fleet(#[from] FleetError),

    #[error(transparent)]
    Event(#[from] EventError),

    #[error(transparent)]
    Sla(#[from] SlaError),
}

pub type SimResult<T> = Result<T, SimError>;
