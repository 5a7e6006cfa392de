//! `patrol-output` — CSV sinks for run results.
//!
//! Two writers, both over the `csv` crate:
//!
//! | Writer                    | File contents                                  |
//! |---------------------------|------------------------------------------------|
//! | [`ComplianceCsvWriter`]   | sampled compliance series (tick, percentage)   |
//! | [`PositionSnapshotWriter`]| fleet positions at snapshot ticks              |
//!
//! `PositionSnapshotWriter` implements `patrol_sim::SimObserver` and rides
//! along during the run; `ComplianceCsvWriter` is fed afterwards from the
//! statistics surface.
//!
//! # Usage
//!
//! ```rust,ignore
//! use patrol_output::{ComplianceCsvWriter, PositionSnapshotWriter};
//!
//! let mut obs = PositionSnapshotWriter::new(Path::new("positions.csv"))?;
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//!
//! let mut compliance = ComplianceCsvWriter::new(Path::new("compliance.csv"))?;
//! compliance.write_series(&sim.compliance_time_series(Tick::ZERO, sim.current_tick()))?;
//! compliance.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;

#[cfg(test)]
mod tests;

pub use csv::ComplianceCsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::PositionSnapshotWriter;
pub use row::{ComplianceRow, PositionRow};
