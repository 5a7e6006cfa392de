//! A tick-driven countdown with an explicit idle state.
//!
//! `-1` means "not armed".  Expiry is reported to the caller as a returned
//! state rather than through a stored callback, so effects stay visible at
//! the call site.

/// What one `tick()` observed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountdownState {
    /// Not armed; nothing happened.
    Idle,
    /// Still counting after the decrement.
    Running,
    /// This decrement reached zero; the countdown is now idle again.
    Expired,
}

/// Reusable countdown: arm, tick until it expires, rearm.
#[derive(Debug, Clone)]
pub struct Countdown {
    max: u64,
    remaining: i64,
}

impl Countdown {
    /// An idle countdown whose default arming duration is `max` ticks.
    pub fn new(max: u64) -> Self {
        Self { max, remaining: -1 }
    }

    /// Arm for the default duration.
    pub fn arm(&mut self) {
        self.remaining = self.max as i64;
    }

    /// Arm for an explicit duration, overwriting any running count
    /// (last call wins).
    pub fn arm_for(&mut self, ticks: u64) {
        self.remaining = ticks as i64;
    }

    /// Disarm without expiring.
    pub fn reset(&mut self) {
        self.remaining = -1;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.remaining >= 0
    }

    /// Ticks left, if armed.
    pub fn remaining(&self) -> Option<u64> {
        (self.remaining >= 0).then_some(self.remaining as u64)
    }

    /// Advance one tick.
    pub fn tick(&mut self) -> CountdownState {
        if self.remaining < 0 {
            return CountdownState::Idle;
        }
        self.remaining -= 1;
        if self.remaining < 0 {
            CountdownState::Expired
        } else {
            CountdownState::Running
        }
    }
}
