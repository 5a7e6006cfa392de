//! Aggregate compliance statistics over the registered SLAs.
//!
//! # Sampling
//!
//! Interval statistics never walk every tick: the interval is sampled at a
//! fixed number of points (`sample_points`, default 1825 — daily samples over
//! five simulated years) with the stride rounded up to at least one tick.
//! Point queries (`percentage_fulfilled_at`) are exact.
//!
//! All percentages are in `[0, 100]`.  A predicate that holds at every sample
//! yields exactly 100.  With no registered SLAs the fraction-based queries
//! return 0 rather than dividing by zero.

use patrol_core::Tick;
use patrol_net::InspectionNetwork;

use crate::sla::{PeriodicSla, ResponseTimeSla};
use crate::window::FlightWindow;

/// Default sample count for interval statistics.
pub const DEFAULT_SAMPLE_POINTS: u64 = 1825;

pub struct SlaEngine {
    slas: Vec<PeriodicSla>,
    response: Option<ResponseTimeSla>,
    flight: FlightWindow,
    sample_points: u64,
}

impl SlaEngine {
    pub fn new(flight: FlightWindow) -> Self {
        Self {
            slas: Vec::new(),
            response: None,
            flight,
            sample_points: DEFAULT_SAMPLE_POINTS,
        }
    }

    pub fn with_sample_points(mut self, sample_points: u64) -> Self {
        self.sample_points = sample_points.max(1);
        self
    }

    // ── Registration ──────────────────────────────────────────────────────

    pub fn add_periodic(&mut self, sla: PeriodicSla) {
        self.slas.push(sla);
    }

    pub fn set_response(&mut self, sla: ResponseTimeSla) {
        self.response = Some(sla);
    }

    pub fn sla_count(&self) -> usize {
        self.slas.len()
    }

    /// Drop every registered SLA, including the response-time goal.
    pub fn clear(&mut self) {
        self.slas.clear();
        self.response = None;
    }

    // ── Flight window ─────────────────────────────────────────────────────

    pub fn flight_window(&self) -> &FlightWindow {
        &self.flight
    }

    #[inline]
    pub fn is_flight_time(&self, t: Tick) -> bool {
        self.flight.is_flight_time(t)
    }

    // ── Point queries ─────────────────────────────────────────────────────

    /// Fraction of registered SLAs fulfilled at `t`, ×100.  0 with no SLAs.
    pub fn percentage_fulfilled_at(&self, net: &InspectionNetwork, t: Tick) -> f64 {
        if self.slas.is_empty() {
            return 0.0;
        }
        let fulfilled = self.slas.iter().filter(|s| s.is_fulfilled(net, t)).count();
        fulfilled as f64 * 100.0 / self.slas.len() as f64
    }

    // ── Interval queries ──────────────────────────────────────────────────

    /// Fraction of sampled ticks in `[first, last)` at which `sla` holds,
    /// ×100.  An empty window is vacuously compliant.
    pub fn percentage(
        &self,
        net: &InspectionNetwork,
        sla: &PeriodicSla,
        first: Tick,
        last: Tick,
        stride: u64,
    ) -> f64 {
        let stride = stride.max(1);
        let mut total = 0u64;
        let mut fulfilled = 0u64;
        let mut t = first.0;
        while t < last.0 {
            total += 1;
            if sla.is_fulfilled(net, Tick(t)) {
                fulfilled += 1;
            }
            t += stride;
        }
        if total == 0 {
            return 100.0;
        }
        fulfilled as f64 * 100.0 / total as f64
    }

    /// Overall compliance at `sample_points` evenly strided ticks.
    pub fn compliance_time_series(
        &self,
        net: &InspectionNetwork,
        first: Tick,
        last: Tick,
    ) -> Vec<(Tick, f64)> {
        let stride = self.sample_stride(first, last);
        let mut series = Vec::new();
        let mut t = first.0;
        while t < last.0 {
            series.push((Tick(t), self.percentage_fulfilled_at(net, Tick(t))));
            t += stride;
        }
        series
    }

    /// Mean overall compliance across the sampled interval.
    pub fn percentage_fulfilled_between(
        &self,
        net: &InspectionNetwork,
        first: Tick,
        last: Tick,
    ) -> f64 {
        mean(
            &self
                .compliance_time_series(net, first, last)
                .iter()
                .map(|&(_, v)| v)
                .collect::<Vec<f64>>(),
        )
    }

    /// Per-SLA compliance percentages over the sampled interval.
    pub fn sla_compliance_data(
        &self,
        net: &InspectionNetwork,
        first: Tick,
        last: Tick,
    ) -> Vec<f64> {
        let stride = self.sample_stride(first, last);
        self.slas
            .iter()
            .map(|sla| self.percentage(net, sla, first, last, stride))
            .collect()
    }

    /// The worst-served SLA's compliance percentage.  0 with no SLAs.
    pub fn lowest_percentage(&self, net: &InspectionNetwork, first: Tick, last: Tick) -> f64 {
        if self.slas.is_empty() {
            return 0.0;
        }
        self.sla_compliance_data(net, first, last)
            .into_iter()
            .fold(100.0, f64::min)
    }

    // ── Variance ──────────────────────────────────────────────────────────

    /// Variance of the overall compliance series across the interval.
    pub fn time_variance(&self, net: &InspectionNetwork, first: Tick, last: Tick) -> f64 {
        let values: Vec<f64> = self
            .compliance_time_series(net, first, last)
            .iter()
            .map(|&(_, v)| v)
            .collect();
        variance(&values)
    }

    pub fn time_std_dev(&self, net: &InspectionNetwork, first: Tick, last: Tick) -> f64 {
        self.time_variance(net, first, last).sqrt()
    }

    /// Variance of per-SLA compliance: how unevenly the fleet serves assets.
    pub fn sla_variance(&self, net: &InspectionNetwork, first: Tick, last: Tick) -> f64 {
        variance(&self.sla_compliance_data(net, first, last))
    }

    pub fn sla_std_dev(&self, net: &InspectionNetwork, first: Tick, last: Tick) -> f64 {
        self.sla_variance(net, first, last).sqrt()
    }

    // ── Coverage goals ────────────────────────────────────────────────────

    /// `true` if every SLA's compliance is at least `threshold` percent.
    pub fn all_above(
        &self,
        net: &InspectionNetwork,
        first: Tick,
        last: Tick,
        threshold: f64,
    ) -> bool {
        self.sla_compliance_data(net, first, last)
            .iter()
            .all(|&p| p >= threshold)
    }

    /// Fraction of SLAs at or above `threshold` percent.  0 with no SLAs.
    pub fn coverage_above(
        &self,
        net: &InspectionNetwork,
        first: Tick,
        last: Tick,
        threshold: f64,
    ) -> f64 {
        if self.slas.is_empty() {
            return 0.0;
        }
        let above = self
            .sla_compliance_data(net, first, last)
            .iter()
            .filter(|&&p| p >= threshold)
            .count();
        above as f64 / self.slas.len() as f64
    }

    /// Combined acceptance check: mean compliance meets `min_average` and no
    /// individual SLA falls under `min_per_sla`.
    pub fn fulfilled(
        &self,
        net: &InspectionNetwork,
        first: Tick,
        last: Tick,
        min_average: f64,
        min_per_sla: f64,
    ) -> bool {
        self.percentage_fulfilled_between(net, first, last) >= min_average
            && self.all_above(net, first, last, min_per_sla)
    }

    // ── Response times ────────────────────────────────────────────────────

    pub fn response_times(&self, net: &InspectionNetwork) -> Vec<u64> {
        self.response
            .map(|r| r.response_times(net))
            .unwrap_or_default()
    }

    pub fn average_response_time(&self, net: &InspectionNetwork) -> f64 {
        self.response
            .map(|r| r.average_response_time(net))
            .unwrap_or(0.0)
    }

    pub fn response_goal_met(&self, net: &InspectionNetwork) -> bool {
        self.response.is_none_or(|r| r.is_fulfilled(net))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn sample_stride(&self, first: Tick, last: Tick) -> u64 {
        (last.0.saturating_sub(first.0) / self.sample_points).max(1)
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}
