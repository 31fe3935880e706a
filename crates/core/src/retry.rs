//! Retry policy with exponential backoff.
//!
//! The policy is pure configuration: [`RetryPolicy::delay_after`] computes
//! the backoff schedule without performing any I/O, so the sequence is
//! unit-testable on its own. The downloader owns the actual sleeps.

use std::time::Duration;

/// Bounds and pacing for the download retry loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay applied after the first failed attempt.
    pub initial_delay: Duration,
    /// Upper bound on any single delay.
    pub backoff_cap: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(5000),
            backoff_cap: Duration::from_millis(60_000),
        }
    }
}

impl RetryPolicy {
    /// Create a policy from caller-supplied bounds.
    #[must_use]
    pub fn new(max_attempts: u32, initial_delay: Duration, backoff_cap: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            backoff_cap,
        }
    }

    /// Delay to apply after the given 1-based attempt has failed.
    ///
    /// `min(initial_delay * 2^(attempt - 1), backoff_cap)`. The caller must
    /// not apply any delay after the final attempt.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_delay
            .saturating_mul(factor)
            .min(self.backoff_cap)
    }
}
