//! Dashboard analytics aggregation
//!
//! Turns one ledger sample into an `AnalyticsSnapshot`. The aggregator calls
//! the sampler exactly once per snapshot, so a snapshot costs the sampler's two
//! remote reads and nothing more.
//!
//! ## Daily buckets
//!
//! `daily_volume` always yields seven 24-hour windows ending at "now", oldest
//! first, each labelled with the weekday of its end. The sample is only the
//! most recent handful of transactions, so in practice nearly everything lands
//! in the last bucket; a true week-long chart needs a historical range query
//! per bucket.

use crate::analysis::sampler::LedgerSampler;
use crate::types::{
    AnalyticsSnapshot, CategoryCount, DailyVolume, SampleStatus, SnapshotReport,
    TransactionRecord,
};
use crate::utils::math::{round_to, success_percentage};
use crate::utils::time::{weekday_label, Clock, MS_PER_DAY};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};

/// Number of trailing days in the volume chart
pub const DAILY_BUCKETS: usize = 7;

/// Records shown in the recent transactions list
pub const RECENT_DISPLAY_LIMIT: usize = 10;

pub struct AnalyticsAggregator {
    sampler: LedgerSampler,
    clock: Arc<dyn Clock>,
    sample_size: usize,
    recent_limit: usize,
}

impl AnalyticsAggregator {
    pub fn new(
        sampler: LedgerSampler,
        clock: Arc<dyn Clock>,
        sample_size: usize,
        recent_limit: usize,
    ) -> Self {
        Self {
            sampler,
            clock,
            sample_size,
            recent_limit,
        }
    }

    /// Snapshot plus the sample status it was built from
    pub async fn build_report(&self) -> SnapshotReport {
        let sample = self.sampler.fetch_recent(self.sample_size).await;
        let snapshot = summarise(&sample.records, self.clock.now_ms(), self.recent_limit);

        match &sample.status {
            SampleStatus::Unavailable { reason } => {
                warn!("Serving empty analytics snapshot: {}", reason)
            }
            SampleStatus::NoActivity => debug!("No recent activity to aggregate"),
            SampleStatus::Fetched { signatures, skipped } => debug!(
                "Aggregated {} records ({} signatures, {} skipped)",
                snapshot.total_transactions, signatures, skipped
            ),
        }

        SnapshotReport {
            snapshot,
            status: sample.status,
        }
    }

    /// Snapshot for the dashboard; never fails
    pub async fn build_snapshot(&self) -> AnalyticsSnapshot {
        self.build_report().await.snapshot
    }

    pub fn sampler(&self) -> &LedgerSampler {
        &self.sampler
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

/// Derive every snapshot field from a sample
pub fn summarise(records: &[TransactionRecord], now_ms: i64, recent_limit: usize) -> AnalyticsSnapshot {
    let successes = records.iter().filter(|r| r.outcome.is_success()).count();
    let total_volume: f64 = records.iter().map(|r| r.amount).sum();

    let accounts: HashSet<&str> = records
        .iter()
        .flat_map(|r| [r.sender.as_str(), r.receiver.as_str()])
        .collect();

    AnalyticsSnapshot {
        total_transactions: records.len(),
        total_volume: round_to(total_volume, 2),
        success_rate: success_percentage(successes, records.len()),
        active_accounts: accounts.len(),
        recent_transactions: records.iter().take(recent_limit).cloned().collect(),
        program_distribution: category_distribution(records),
        daily_volume: daily_volume(records, now_ms),
    }
}

/// Record counts per category, in order of first appearance
pub fn category_distribution(records: &[TransactionRecord]) -> Vec<CategoryCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut distribution: Vec<CategoryCount> = Vec::new();

    for record in records {
        match positions.get(record.category.as_str()) {
            Some(&index) => distribution[index].count += 1,
            None => {
                positions.insert(record.category.as_str(), distribution.len());
                distribution.push(CategoryCount {
                    name: record.category.clone(),
                    count: 1,
                });
            }
        }
    }

    distribution
}

/// Seven trailing 24-hour buckets ending at `now_ms`, oldest first
///
/// Bucket `i` covers `(end - 24h, end]` with `end = now - (6 - i) days`.
pub fn daily_volume(records: &[TransactionRecord], now_ms: i64) -> Vec<DailyVolume> {
    (0..DAILY_BUCKETS as i64)
        .map(|i| {
            let end = now_ms - (DAILY_BUCKETS as i64 - 1 - i) * MS_PER_DAY;
            let start = end - MS_PER_DAY;

            let (transactions, value) = records
                .iter()
                .filter(|r| r.observed_at > start && r.observed_at <= end)
                .fold((0usize, 0f64), |(count, sum), r| (count + 1, sum + r.amount));

            DailyVolume {
                name: weekday_label(end),
                transactions,
                value: round_to(value, 2),
            }
        })
        .collect()
}
