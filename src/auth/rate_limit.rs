//! Sliding-window rate limiting per source address
//!
//! Login and public tracking endpoints are throttled independently. The
//! limiter fails closed before credentials are even looked at, so throttled
//! responses carry no signal about account validity.

use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Per-address sliding window counter.
pub struct RateLimiter {
    limit: usize,
    window: Duration,
    hits: Mutex<HashMap<IpAddr, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// 5 attempts per 10 minutes, the login budget.
    pub fn for_login() -> Self {
        Self::new(5, Duration::from_secs(10 * 60))
    }

    /// 60 events per minute, the public tracking budget.
    pub fn for_tracking() -> Self {
        Self::new(60, Duration::from_secs(60))
    }

    /// Record an attempt from `addr`; returns `false` when the address has
    /// exhausted its budget for the current window. Rejected attempts are
    /// not recorded, so at most `limit` timestamps are kept per address.
    pub fn check(&self, addr: IpAddr) -> bool {
        self.check_at(addr, Instant::now())
    }

    fn check_at(&self, addr: IpAddr, now: Instant) -> bool {
        let mut hits = self.hits.lock();
        let queue = hits.entry(addr).or_default();

        while let Some(oldest) = queue.front() {
            if now.duration_since(*oldest) >= self.window {
                queue.pop_front();
            } else {
                break;
            }
        }

        if queue.len() >= self.limit {
            return false;
        }

        queue.push_back(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(last: u8) -> IpAddr {
        IpAddr::from([127, 0, 0, last])
    }

    #[test]
    fn test_sixth_attempt_is_rejected() {
        let limiter = RateLimiter::new(5, Duration::from_secs(600));
        for _ in 0..5 {
            assert!(limiter.check(addr(1)));
        }
        assert!(!limiter.check(addr(1)));
        assert!(!limiter.check(addr(1)));
    }

    #[test]
    fn test_addresses_are_throttled_independently() {
        let limiter = RateLimiter::new(2, Duration::from_secs(600));
        assert!(limiter.check(addr(1)));
        assert!(limiter.check(addr(1)));
        assert!(!limiter.check(addr(1)));

        assert!(limiter.check(addr(2)));
    }

    #[test]
    fn test_window_slides() {
        let limiter = RateLimiter::new(2, Duration::from_millis(50));
        let start = Instant::now();

        assert!(limiter.check_at(addr(1), start));
        assert!(limiter.check_at(addr(1), start));
        assert!(!limiter.check_at(addr(1), start));

        // Past the window the budget is fresh again.
        let later = start + Duration::from_millis(60);
        assert!(limiter.check_at(addr(1), later));
    }
}
