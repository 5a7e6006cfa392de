//! Event-subsystem error type.

use thiserror::Error;

/// Errors produced by `patrol-events`.  All of these are construction-time:
/// a successfully built generator cannot fail at query time.
#[derive(Debug, Error, PartialEq)]
pub enum EventError {
    #[error("sampling stride must be at least 1")]
    InvalidStride,

    #[error("likelihood {0} is outside [0, 1]")]
    InvalidLikelihood(f64),

    #[error("downtime range [{min}, {max}] is inverted")]
    InvalidDowntimeRange { min: u64, max: u64 },

    #[error("downtime must be at least 1 tick")]
    ZeroDowntime,
}

pub type EventResult<T> = Result<T, EventError>;
