//! Simulation observer trait for progress reporting and data collection.

use patrol_core::Tick;
use patrol_events::Event;
use patrol_fleet::Dispatcher;
use patrol_net::InspectionNetwork;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick) {
///         if tick.0 % self.interval == 0 {
///             println!("tick {tick}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, after every agent has stepped.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// A scheduled event fired and was handled (targets already resolved).
    fn on_event_fired(&mut self, _tick: Tick, _event: &Event) {}

    /// A scheduled event could not be served: no eligible agent took the
    /// dispatch, or a failure found the whole fleet already crashed.
    fn on_request_dropped(&mut self, _tick: Tick, _event: &Event) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks).  Read-only access to the fleet and network lets output
    /// writers record positions and compliance without the sim knowing any
    /// specific format.
    fn on_snapshot(&mut self, _tick: Tick, _fleet: &Dispatcher, _net: &InspectionNetwork) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
