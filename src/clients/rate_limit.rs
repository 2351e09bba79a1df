//! Client-side rate limiting.

use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::config::RateLimit;

/// Hands out permits for outgoing requests.
///
/// One permit is acquired per HTTP request, including each page of a
/// paginated fetch. Implementations must be safe to share between
/// concurrent calls.
#[async_trait]
pub trait RateLimiter: Send + Sync + fmt::Debug {
    /// Waits until a permit is available and takes it.
    async fn acquire(&self);
}

/// A token bucket refilled continuously at a fixed rate.
///
/// The bucket starts full, so the first `burst` permits are immediate.
/// Timing uses tokio's clock, which makes the bucket deterministic under
/// `tokio::time::pause`.
///
/// # Example
///
/// ```rust
/// use notion_api::clients::{RateLimiter, TokenBucket};
/// use notion_api::RateLimit;
///
/// # tokio_test::block_on(async {
/// let bucket = TokenBucket::new(RateLimit::new(10.0, 2).unwrap());
/// bucket.acquire().await;
/// bucket.acquire().await;
/// assert!(!bucket.try_acquire());
/// # });
/// ```
#[derive(Debug)]
pub struct TokenBucket {
    per_second: f64,
    burst: f64,
    state: Mutex<BucketState>,
}

#[derive(Debug)]
struct BucketState {
    tokens: f64,
    refilled_at: Instant,
}

impl TokenBucket {
    /// Creates a full bucket.
    #[must_use]
    pub fn new(limit: RateLimit) -> Self {
        let burst = f64::from(limit.burst());
        Self {
            per_second: limit.per_second(),
            burst,
            state: Mutex::new(BucketState {
                tokens: burst,
                refilled_at: Instant::now(),
            }),
        }
    }

    /// Takes a permit if one is available right now.
    #[must_use]
    pub fn try_acquire(&self) -> bool {
        self.take().is_ok()
    }

    /// Takes a permit, or returns how long until one is available.
    fn take(&self) -> Result<(), Duration> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let now = Instant::now();
        let elapsed = now.duration_since(state.refilled_at).as_secs_f64();
        state.tokens = elapsed.mul_add(self.per_second, state.tokens).min(self.burst);
        state.refilled_at = now;

        if state.tokens >= 1.0 {
            state.tokens -= 1.0;
            Ok(())
        } else {
            let wait = (1.0 - state.tokens) / self.per_second;
            Err(Duration::try_from_secs_f64(wait).unwrap_or(Duration::MAX))
        }
    }
}

#[async_trait]
impl RateLimiter for TokenBucket {
    async fn acquire(&self) {
        while let Err(wait) = self.take() {
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(per_second: f64, burst: u32) -> TokenBucket {
        TokenBucket::new(RateLimit::new(per_second, burst).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_bucket_starts_full() {
        let bucket = bucket(1.0, 3);
        assert!(bucket.try_acquire());
        assert!(bucket.try_acquire());
        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());
    }

    #[tokio::test(start_paused = true)]
    async fn test_bucket_refills_over_time() {
        let bucket = bucket(2.0, 1);
        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());

        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(bucket.try_acquire());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refill_never_exceeds_burst() {
        let bucket = bucket(100.0, 2);
        tokio::time::advance(Duration::from_secs(10)).await;
        assert!(bucket.try_acquire());
        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_waits_for_next_token() {
        let bucket = bucket(1.0, 1);
        bucket.acquire().await;

        let start = Instant::now();
        bucket.acquire().await;
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tiny_rate_waits_without_overflowing() {
        let bucket = bucket(1e-20, 1);
        assert!(bucket.try_acquire());
        assert!(!bucket.try_acquire());
        assert_eq!(bucket.take(), Err(Duration::MAX));
    }
}
