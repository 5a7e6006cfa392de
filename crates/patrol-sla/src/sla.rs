//! Individual service-level agreements.

use patrol_core::Tick;
use patrol_net::{EntityRef, Inspectable, InspectionNetwork};
use serde::{Deserialize, Serialize};

// ── PeriodicSla ───────────────────────────────────────────────────────────────

/// "This asset is inspected at least every `max_interval` ticks."
///
/// A never-inspected asset counts its age from tick 0, so a fresh network is
/// compliant until the first interval runs out.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct PeriodicSla {
    pub entity: EntityRef,
    pub max_interval: u64,
}

impl PeriodicSla {
    pub fn new(entity: EntityRef, max_interval: u64) -> Self {
        Self { entity, max_interval }
    }

    /// `true` if the asset's most recent inspection at `t` is recent enough.
    pub fn is_fulfilled(&self, net: &InspectionNetwork, t: Tick) -> bool {
        let last = match self.entity {
            EntityRef::Node(n) => net.node(n).last_inspection_time_at(t),
            EntityRef::Edge(e) => net.edge(e).last_inspection_time_at(t),
        };
        t.since(last) <= self.max_interval
    }
}

// ── ResponseTimeSla ───────────────────────────────────────────────────────────

/// "On-demand requests are served within `goal` ticks, on average."
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct ResponseTimeSla {
    pub goal: u64,
}

impl ResponseTimeSla {
    pub fn new(goal: u64) -> Self {
        Self { goal }
    }

    /// Every measured response time across all assets, ascending.
    ///
    /// Each rising-edge needed time is paired with the first inspection at or
    /// after it.  A request never answered yields no measurement: it is
    /// excluded, not counted as zero.
    pub fn response_times(&self, net: &InspectionNetwork) -> Vec<u64> {
        let mut times = Vec::new();
        for node in &net.nodes {
            collect_responses(node, &mut times);
        }
        for edge in &net.edges {
            collect_responses(edge, &mut times);
        }
        times.sort_unstable();
        times
    }

    /// Mean measured response time; 0 when nothing was measured.
    pub fn average_response_time(&self, net: &InspectionNetwork) -> f64 {
        let times = self.response_times(net);
        if times.is_empty() {
            return 0.0;
        }
        times.iter().sum::<u64>() as f64 / times.len() as f64
    }

    /// `true` if the average response time meets the goal.
    pub fn is_fulfilled(&self, net: &InspectionNetwork) -> bool {
        self.average_response_time(net) <= self.goal as f64
    }
}

fn collect_responses(asset: &impl Inspectable, out: &mut Vec<u64>) {
    for &needed in asset.log().needed_times() {
        if let Some(answered) = asset.next_inspection_time_at(needed) {
            out.push(answered.since(needed));
        }
    }
}
