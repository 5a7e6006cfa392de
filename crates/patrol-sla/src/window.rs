//! Flight-window calendar.
//!
//! Agents may only fly on the first `days_per_month` days of each 30-day
//! month, and only for the first `minutes_per_day` minutes of each day.  At
//! one tick per minute both checks are plain modular comparisons.

use patrol_core::TICKS_PER_DAY;
use serde::{Deserialize, Serialize};

use crate::{SlaError, SlaResult};

/// Ticks in one 30-day scheduling month.
const TICKS_PER_MONTH: u64 = 30 * TICKS_PER_DAY;

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct FlightWindow {
    pub days_per_month: u64,
    pub minutes_per_day: u64,
}

impl FlightWindow {
    /// Both dimensions must be strictly positive and within the calendar.
    pub fn new(days_per_month: u64, minutes_per_day: u64) -> SlaResult<Self> {
        if days_per_month == 0
            || days_per_month > 30
            || minutes_per_day == 0
            || minutes_per_day > TICKS_PER_DAY
        {
            return Err(SlaError::InvalidFlightWindow {
                days: days_per_month,
                minutes: minutes_per_day,
            });
        }
        Ok(Self { days_per_month, minutes_per_day })
    }

    /// Always-open window.
    pub fn unrestricted() -> Self {
        Self {
            days_per_month: 30,
            minutes_per_day: TICKS_PER_DAY,
        }
    }

    /// `true` if agents may fly at tick `t`.
    #[inline]
    pub fn is_flight_time(&self, t: patrol_core::Tick) -> bool {
        t.0 % TICKS_PER_MONTH < self.days_per_month * TICKS_PER_DAY
            && t.0 % TICKS_PER_DAY < self.minutes_per_day
    }
}

impl Default for FlightWindow {
    fn default() -> Self {
        Self::unrestricted()
    }
}
