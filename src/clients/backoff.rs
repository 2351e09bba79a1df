//! Delays between retry attempts.

use std::fmt;
use std::time::Duration;

use rand::Rng;

/// Computes how long to wait before a retry.
///
/// `attempt` is 1 for the first retry, 2 for the second, and so on.
pub trait BackoffStrategy: Send + Sync + fmt::Debug {
    /// Returns the delay before retry number `attempt`.
    fn delay(&self, attempt: u32) -> Duration;
}

/// Exponential backoff with random jitter.
///
/// The nominal delay doubles with every attempt, starting at `base` and
/// capped at `max`. A random offset of up to a third of the nominal delay
/// is added or subtracted so concurrent clients spread out.
///
/// # Example
///
/// ```rust
/// use notion_api::clients::{BackoffStrategy, ExponentialJitterBackoff};
/// use std::time::Duration;
///
/// let backoff = ExponentialJitterBackoff::new(Duration::from_millis(100), Duration::from_secs(1));
/// let delay = backoff.delay(2);
/// assert!(delay >= Duration::from_millis(133) && delay <= Duration::from_millis(267));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExponentialJitterBackoff {
    base: Duration,
    max: Duration,
}

impl ExponentialJitterBackoff {
    /// Creates a backoff starting at `base` and never exceeding `max`
    /// before jitter is applied.
    #[must_use]
    pub const fn new(base: Duration, max: Duration) -> Self {
        Self { base, max }
    }

    fn nominal(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base.saturating_mul(1 << exponent).min(self.max)
    }
}

impl Default for ExponentialJitterBackoff {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(30))
    }
}

impl BackoffStrategy for ExponentialJitterBackoff {
    fn delay(&self, attempt: u32) -> Duration {
        let nominal = self.nominal(attempt);
        let spread = u64::try_from(nominal.as_millis() / 3).unwrap_or(u64::MAX);
        if spread == 0 {
            return nominal;
        }

        let offset = rand::thread_rng().gen_range(0..=spread * 2);
        if offset >= spread {
            nominal.saturating_add(Duration::from_millis(offset - spread))
        } else {
            nominal.saturating_sub(Duration::from_millis(spread - offset))
        }
    }
}

/// The same delay before every retry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstantBackoff(Duration);

impl ConstantBackoff {
    /// Creates a constant backoff.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self(delay)
    }
}

impl BackoffStrategy for ConstantBackoff {
    fn delay(&self, _attempt: u32) -> Duration {
        self.0
    }
}
