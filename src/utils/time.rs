//! Time utilities
//!
//! All day-bucketing and expiry math goes through the [`Clock`] trait rather
//! than ambient system time, so aggregation windows are deterministic under
//! test. The calendar day is always the UTC calendar date.

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::Mutex;

/// Source of "now" for day derivation and session expiry checks.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Current UTC calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests.
///
/// Starts at the given instant; `set` and `advance_days` move it explicitly.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock() = instant;
    }

    pub fn advance_days(&self, days: i64) {
        let mut now = self.now.lock();
        *now += chrono::Duration::days(days);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}
