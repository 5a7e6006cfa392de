//! SLA-subsystem error type.

use thiserror::Error;

/// Errors produced by `patrol-sla`.
#[derive(Debug, Error, PartialEq)]
pub enum SlaError {
    #[error("flight window of {days} days/month and {minutes} minutes/day is not usable")]
    InvalidFlightWindow { days: u64, minutes: u64 },
}

pub type SlaResult<T> = Result<T, SlaError>;
