//! Readiness gate for generative-answer requests.
//!
//! Until the panel reports ready, a generative-answer request cannot be
//! delivered. Instead of rescheduling forever, requests are retried with
//! exponential backoff and abandoned after a fixed number of attempts.

use std::time::Duration;

use par_connector_config::ReadinessConfig;

/// Backoff schedule for deferred requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    base_delay: Duration,
    max_delay: Duration,
    max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(base_delay: Duration, max_delay: Duration, max_attempts: u32) -> Self {
        Self {
            base_delay,
            max_delay: max_delay.max(base_delay),
            max_attempts,
        }
    }

    pub fn from_config(config: &ReadinessConfig) -> Self {
        Self::new(
            Duration::from_millis(config.retry_delay_ms),
            Duration::from_millis(config.max_retry_delay_ms),
            config.max_attempts,
        )
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay before retry number `attempt` (1-based), or `None` once the
    /// attempt budget is spent.
    ///
    /// `delay(n) = min(base * 2^(n-1), max)`
    pub fn delay_for(&self, attempt: u32) -> Option<Duration> {
        if attempt == 0 || attempt > self.max_attempts {
            return None;
        }
        let factor = 1u32.checked_shl(attempt - 1).unwrap_or(u32::MAX);
        let delay = self
            .base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay);
        Some(delay.min(self.max_delay))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ReadinessConfig::default())
    }
}

/// Outcome of a gated generative-answer request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Delivered to a handler.
    Dispatched,
    /// The panel is ready but no handler accepts the request (unknown tab or
    /// no handler registered).
    Dropped,
    /// Not ready yet; resubmit with `attempt` after `retry_in`.
    Deferred { retry_in: Duration, attempt: u32 },
    /// Not ready and the retry budget is spent.
    TimedOut { attempts: u32 },
}
