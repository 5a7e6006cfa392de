//! `patrol-events` — timed demand and failure injection.
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`event`]     | `Event`, `EventKind`                                   |
//! | [`queue`]     | tick-bucketed `EventQueue`                             |
//! | [`generator`] | static + probabilistic generators, failure tracking    |

pub mod error;
pub mod event;
pub mod generator;
pub mod queue;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EventError, EventResult};
pub use event::{Event, EventKind};
pub use generator::{
    EventGenerator, ProbabilisticEventGenerator, ProbabilisticFailureGenerator,
    StaticEventGenerator, StaticFailureGenerator,
};
pub use queue::EventQueue;
