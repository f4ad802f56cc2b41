//! Retry configuration and response-outcome classification.

use std::time::Duration;

/// Configuration for the executor's bounded retry loop.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum total transport attempts for one logical call, including the
    /// first. Values below 1 behave as 1.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Cap on the backoff delay.
    pub max_delay: Duration,
    /// Whether to add jitter to backoff delays.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// A config that never retries.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Backoff delay after the given completed attempt (1-indexed): the base
    /// delay doubles each attempt and is capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16) as i32;
        let base = self.initial_delay.as_millis() as f64 * 2f64.powi(exponent);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let jitter_range = capped * 0.25;
            let jitter = (rand::random::<f64>() - 0.5) * 2.0 * jitter_range;
            (capped + jitter).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}

/// Classification of one HTTP exchange, derived purely from the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx.
    Success,
    /// 429 — retried after the server-provided hint, or backoff if absent.
    RateLimited { retry_after: Option<Duration> },
    /// 5xx — retried with exponential backoff.
    Transient { status: u16 },
    /// Any other status — surfaced immediately, never retried.
    Permanent { status: u16 },
}

/// Classify a response status. Transport-level failures (timeouts, resets)
/// are classified separately via
/// [`TransportError::is_retryable`](crate::error::TransportError::is_retryable).
pub fn classify(status: u16, retry_after: Option<Duration>) -> Outcome {
    match status {
        200..=299 => Outcome::Success,
        429 => Outcome::RateLimited { retry_after },
        500..=599 => Outcome::Transient { status },
        _ => Outcome::Permanent { status },
    }
}
