//! Client-side rate limiting wrapper around governor.
//!
//! Birdeye enforces per-key quotas; requests wait for a permit instead of
//! being rejected upstream with 429s.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, instrument};

const FALLBACK_REQUESTS_PER_SECOND: NonZeroU32 = match NonZeroU32::new(10) {
    Some(value) => value,
    None => unreachable!(),
};

/// Direct (unkeyed) limiter shared by all requests of one client.
pub struct RequestLimiter {
    /// Underlying governor rate limiter
    limiter: DefaultDirectRateLimiter,
    /// Configured requests per second
    quota: u32,
    /// Permits handed out so far
    granted: AtomicU64,
}

impl RequestLimiter {
    /// Create a limiter allowing `requests_per_second`; zero falls back to 10.
    pub fn new(requests_per_second: u32) -> Self {
        let per_second = NonZeroU32::new(requests_per_second).unwrap_or(FALLBACK_REQUESTS_PER_SECOND);

        Self {
            limiter: RateLimiter::direct(Quota::per_second(per_second)),
            quota: per_second.get(),
            granted: AtomicU64::new(0),
        }
    }

    /// Wait until a request is allowed.
    #[instrument(skip(self))]
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
        let granted = self.granted.fetch_add(1, Ordering::Relaxed) + 1;
        debug!("Rate limit permit granted ({} total)", granted);
    }

    /// Non-blocking check; `true` when a request may go out immediately.
    pub fn try_acquire(&self) -> bool {
        let allowed = self.limiter.check().is_ok();
        if allowed {
            self.granted.fetch_add(1, Ordering::Relaxed);
        }
        allowed
    }

    pub fn quota(&self) -> u32 {
        self.quota
    }

    pub fn granted(&self) -> u64 {
        self.granted.load(Ordering::Relaxed)
    }
}
