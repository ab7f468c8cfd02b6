use std::time::Duration;

const DEFAULT_MAX_ATTEMPTS: u32 = 40;
const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// Attempt budget and pacing shared by every wait loop.
///
/// A loop observes remote state on attempts `0..=max_attempts` and sleeps `interval` between two observations.
/// With `max_attempts = 0` there is exactly one observation and no sleep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl PollPolicy {
    pub fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Build a policy from a raw attempt count and a delay in whole seconds.
    pub fn from_secs(max_attempts: u32, interval_secs: u64) -> Self {
        Self::new(max_attempts, Duration::from_secs(interval_secs))
    }

    /// Attempt indices a loop governed by this policy will observe.
    pub fn attempts(&self) -> std::ops::RangeInclusive<u32> {
        0..=self.max_attempts
    }

    /// Whether `attempt` is the final observation of the budget.
    #[inline]
    pub fn is_last(&self, attempt: u32) -> bool {
        attempt >= self.max_attempts
    }

    /// Total number of observations the budget allows.
    pub fn observations(&self) -> u64 {
        u64::from(self.max_attempts) + 1
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_INTERVAL)
    }
}
