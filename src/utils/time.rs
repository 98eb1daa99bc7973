//! Time utilities for sampling and daily bucketing
//!
//! Wall-clock reads go through the `Clock` trait so the cache TTL and the
//! daily buckets can be driven deterministically in tests.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

/// Milliseconds in a day (24 × 60 × 60 × 1000 = 86400000)
pub const MS_PER_DAY: i64 = 86_400_000;

/// Source of "now" in milliseconds since the Unix epoch
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// The real wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

/// Three-letter UTC weekday name ("Mon", "Tue", ...) for a millisecond timestamp
///
/// Returns "???" for timestamps chrono cannot represent.
///
/// # Examples
/// ```
/// use ledger_analytics::utils::time::weekday_label;
/// assert_eq!(weekday_label(0), "Thu");
/// assert_eq!(weekday_label(1_704_067_200_000), "Mon");
/// ```
pub fn weekday_label(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%a").to_string())
        .unwrap_or_else(|| "???".to_string())
}

/// Convert a ledger block time (seconds) to milliseconds
pub fn block_time_to_ms(block_time_secs: i64) -> i64 {
    block_time_secs.saturating_mul(1000)
}
