//! Rate limiter implementation using governor and Tokio Semaphore.
//!
//! - Governor (GCRA algorithm) enforces requests per minute
//! - Tokio Semaphore enforces the concurrent request limit

use crate::RateLimitConfig;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

// Type alias for our direct rate limiter
type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate limiter shared by every worker of one image batch.
///
/// Cloning is cheap; clones share the same quota and semaphore.
///
/// # Example
///
/// ```rust
/// use storyboard_rate_limit::{RateLimitConfig, RateLimiter};
///
/// # #[tokio::main]
/// # async fn main() {
/// let limiter = RateLimiter::new(&RateLimitConfig { rpm: Some(60), max_concurrent: Some(2) });
/// let guard = limiter.acquire().await;
/// assert_eq!(limiter.available_slots(), 1);
/// drop(guard);
/// assert_eq!(limiter.available_slots(), 2);
/// # }
/// ```
#[derive(Clone)]
pub struct RateLimiter {
    // RPM limiter (requests per minute)
    rpm_limiter: Option<Arc<DirectRateLimiter>>,

    // Concurrent request semaphore
    concurrent_semaphore: Arc<Semaphore>,

    max_concurrent: usize,
}

impl RateLimiter {
    /// Create a new rate limiter from a configuration.
    ///
    /// - If `rpm` is Some and non-zero, enforces requests per minute
    /// - Concurrency is capped at `max_concurrent` (at least one)
    pub fn new(config: &RateLimitConfig) -> Self {
        let rpm_limiter = config.rpm.and_then(|rpm| {
            NonZeroU32::new(rpm).map(|n| {
                let quota = Quota::per_minute(n);
                Arc::new(GovernorRateLimiter::direct(quota))
            })
        });

        let max_concurrent = config.workers();

        Self {
            rpm_limiter,
            concurrent_semaphore: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
        }
    }

    /// Maximum number of requests allowed in flight.
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Slots currently free.
    pub fn available_slots(&self) -> usize {
        self.concurrent_semaphore.available_permits()
    }

    /// Wait until a request may start.
    ///
    /// Returns a guard that releases the concurrent slot when dropped.
    pub async fn acquire(&self) -> RateLimiterGuard {
        // Acquire the slot first so queued workers don't burn RPM quota
        let permit = self.concurrent_semaphore.clone().acquire_owned().await.ok();

        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }

        RateLimiterGuard { _permit: permit }
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("rpm_limited", &self.rpm_limiter.is_some())
            .field("max_concurrent", &self.max_concurrent)
            .finish()
    }
}

/// Guard holding a concurrent request slot.
///
/// The semaphore is never closed, so the permit is always present in practice.
#[derive(Debug)]
pub struct RateLimiterGuard {
    _permit: Option<OwnedSemaphorePermit>,
}
