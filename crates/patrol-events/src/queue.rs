//! Tick-bucketed event queue.
//!
//! Events for the same tick fire in insertion order; buckets fire in tick
//! order.  The tick loop drains exactly one bucket per iteration, so a
//! `BTreeMap` keyed by tick is the natural shape.

use std::collections::BTreeMap;

use patrol_core::Tick;

use crate::event::Event;

#[derive(Debug, Default)]
pub struct EventQueue {
    buckets: BTreeMap<Tick, Vec<Event>>,
    len: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule one event.
    pub fn push(&mut self, event: Event) {
        self.buckets.entry(event.tick).or_default().push(event);
        self.len += 1;
    }

    /// Schedule a batch.
    pub fn extend(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.push(event);
        }
    }

    /// Remove and return every event scheduled for exactly `tick`, in
    /// insertion order.  Empty if nothing is due.
    pub fn drain_tick(&mut self, tick: Tick) -> Vec<Event> {
        let drained = self.buckets.remove(&tick).unwrap_or_default();
        self.len -= drained.len();
        drained
    }

    /// Earliest tick with pending events.
    pub fn next_tick(&self) -> Option<Tick> {
        self.buckets.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
