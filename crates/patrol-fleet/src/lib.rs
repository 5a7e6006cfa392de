//! `patrol-fleet` — UAV agents and their dispatcher.
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`countdown`] | reusable tick countdown with an explicit idle state    |
//! | [`uav`]       | per-agent state machine (battery, dwell, crash, radio) |
//! | [`dispatcher`]| fleet roster, tick loop, nearest-agent dispatch        |

pub mod countdown;
pub mod dispatcher;
pub mod error;
pub mod uav;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use countdown::{Countdown, CountdownState};
pub use dispatcher::Dispatcher;
pub use error::{FleetError, FleetResult};
pub use uav::{StepEffect, Uav, UavConfig, UavStatus};
