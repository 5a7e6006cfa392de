//! `patrol-sim` — run assembly and the tick loop.
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`config`]   | serde `SimulationConfig`, generator and network sources  |
//! | [`builder`]  | fail-fast `SimulationBuilder`                            |
//! | [`sim`]      | `Simulation` tick loop, event firing, statistics surface |
//! | [`observer`] | `SimObserver` hooks, `NoopObserver`                      |

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimulationBuilder;
pub use config::{GeneratorSpec, NetworkSource, SimulationConfig};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Simulation;
