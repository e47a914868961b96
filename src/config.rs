//! Tracker configuration.

use crate::time::TimeDuration;

/// Default debounce quiet period in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 50;

/// Default time to let pull-ups settle before interrupts are armed.
pub const DEFAULT_SETTLE_MS: u32 = 10;

/// Debounce and start-up timing for a [`ButtonTracker`](crate::ButtonTracker).
///
/// Fields are public so a configuration can be built in a `const` context,
/// which [`ButtonTracker::with_config`](crate::ButtonTracker::with_config)
/// needs when the tracker is placed in a `static`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig<D: TimeDuration> {
    /// How long an input must stay quiet after its last raw transition
    /// before a new transition is accepted.
    pub debounce_window: D,

    /// Delay between configuring the pull-up inputs and arming interrupts.
    pub settle_time_ms: u32,
}

impl<D: TimeDuration> TrackerConfig<D> {
    /// Creates a configuration with the default timings.
    pub fn new() -> Self {
        Self {
            debounce_window: D::from_millis(DEFAULT_DEBOUNCE_MS),
            settle_time_ms: DEFAULT_SETTLE_MS,
        }
    }

    /// Sets the debounce quiet period.
    pub fn debounce_window_ms(mut self, millis: u64) -> Self {
        self.debounce_window = D::from_millis(millis);
        self
    }

    /// Sets the pull-up settle delay.
    pub fn settle_time_ms(mut self, millis: u32) -> Self {
        self.settle_time_ms = millis;
        self
    }
}

impl<D: TimeDuration> Default for TrackerConfig<D> {
    fn default() -> Self {
        Self::new()
    }
}
