//! Plain data row types written by the CSV sinks.

use patrol_fleet::UavStatus;

/// One agent's position and status at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionRow {
    pub tick: u64,
    pub agent_id: u32,
    pub x: f64,
    pub y: f64,
    pub status: UavStatus,
}

/// One point of the compliance time series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplianceRow {
    pub tick: u64,
    pub percent_fulfilled: f64,
}
