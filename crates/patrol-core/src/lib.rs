//! `patrol-core` — foundational types for the patrol UAV fleet simulator.
//!
//! This crate is a dependency of every other `patrol-*` crate.  It
//! intentionally has no `patrol-*` dependencies and minimal external ones
//! (only `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `NodeId`, `EdgeId`                         |
//! | [`geo`]         | `Point2`, Euclidean distance, clamped stepping        |
//! | [`time`]        | `Tick`, `SimClock`                                    |
//! | [`rng`]         | `AgentRng` (per-UAV), `SimRng` (global)               |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::Point2;
pub use ids::{AgentId, EdgeId, NodeId};
pub use rng::{AgentRng, SimRng};
pub use time::{SimClock, Tick, TICKS_PER_DAY, TICKS_PER_YEAR};
