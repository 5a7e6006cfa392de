//! `patrol-nav` — routing policies for inspection agents.
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`strategy`]  | the `NavStrategy` trait, `Job`, `NavCtx`                |
//! | [`location`]  | `EdgeNodeLocation` destination addressing               |
//! | [`postman`]   | approximate Chinese-Postman closed walks                |
//! | [`cycle`]     | `CycleTour` + fixed-order tour following                |
//! | [`lni`]       | greedy Longest-Not-Inspected family                     |
//! | [`lookahead`] | second-order LNI (± square-root damping)                |
//! | [`aco`]       | pheromone-weighted probabilistic choice                 |
//! | [`path_plan`] | battery-budgeted multi-hop path planning                |
//! | [`random`]    | uniform random baseline                                 |
//! | [`registry`]  | closed `StrategySpec` selection                         |

pub mod aco;
pub mod cycle;
pub mod error;
pub mod lni;
pub mod location;
pub mod lookahead;
pub mod path_plan;
pub mod postman;
pub mod random;
pub mod registry;
pub mod strategy;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use aco::{AcoHeuristic, AcoNav, DEFAULT_ALPHA, DEFAULT_BETA};
pub use cycle::{CycleNav, CycleTour};
pub use error::{NavError, NavResult};
pub use lni::{GreedyLni, IndividualLni, InterUavLni};
pub use location::EdgeNodeLocation;
pub use lookahead::Lookahead;
pub use path_plan::{PathPlanNav, PathScoring};
pub use random::RandomNav;
pub use registry::StrategySpec;
pub use strategy::{Job, NavCtx, NavStrategy};
