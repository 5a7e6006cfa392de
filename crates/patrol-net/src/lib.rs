//! `patrol-net` — the inspection network model.
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`inspect`]  | `InspectionLog`, the `Inspectable` contract               |
//! | [`network`]  | `Node`, `Edge`, `InspectionNetwork`, pheromone decay      |
//! | [`loader`]   | JSON survey files → cleaned, pruned `InspectionNetwork`   |
//! | [`dijkstra`] | shortest distances / paths with per-query buffers         |

pub mod dijkstra;
pub mod error;
pub mod inspect;
pub mod loader;
pub mod network;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use dijkstra::{shortest_distances, shortest_path};
pub use error::{NetError, NetResult};
pub use inspect::{EntityRef, Inspectable, InspectionLog};
pub use loader::{build_network, EdgeSpec, LoadOptions, NetworkSpec, NodeSpec};
pub use network::{Edge, InspectionNetwork, Node, PHEROMONE_DECAY_TICKS};
