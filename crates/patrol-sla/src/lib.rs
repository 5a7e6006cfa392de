//! `patrol-sla` — service-level compliance measurement.
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`sla`]    | `PeriodicSla`, `ResponseTimeSla`                          |
//! | [`window`] | `FlightWindow` calendar arithmetic                        |
//! | [`engine`] | `SlaEngine` point/interval statistics, coverage goals     |

pub mod engine;
pub mod error;
pub mod sla;
pub mod window;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use engine::{SlaEngine, DEFAULT_SAMPLE_POINTS};
pub use error::{SlaError, SlaResult};
pub use sla::{PeriodicSla, ResponseTimeSla};
pub use window::FlightWindow;
