//! Dashboard analytics types

use crate::types::transaction::TransactionRecord;
use serde::{Deserialize, Serialize};

/// Summary statistics derived from one ledger sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    /// Records in the sample, not the ledger-wide total
    pub total_transactions: usize,

    /// Sum of record amounts, 2 decimal places
    pub total_volume: f64,

    /// Percentage of successful records, 1 decimal place; 100 for an empty sample
    pub success_rate: f64,

    /// Distinct truncated sender/receiver strings
    pub active_accounts: usize,

    /// Leading records of the sample, in ledger order
    pub recent_transactions: Vec<TransactionRecord>,

    /// Record counts per category, in first-seen order
    pub program_distribution: Vec<CategoryCount>,

    /// Seven trailing daily buckets, oldest first
    pub daily_volume: Vec<DailyVolume>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// One day of the trailing week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyVolume {
    /// Three-letter weekday name
    pub name: String,
    pub transactions: usize,
    /// 2 decimal places
    pub value: f64,
}

/// Why a sample looks the way it does
///
/// The public snapshot cannot tell "nothing happened" from "provider down";
/// this keeps the two apart for logging and the HTTP envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleStatus {
    /// Both remote reads succeeded; `skipped` entries had no usable body
    Fetched { signatures: usize, skipped: usize },
    /// The signature listing came back empty
    NoActivity,
    /// A remote read failed
    Unavailable { reason: String },
}

impl SampleStatus {
    pub fn is_available(&self) -> bool {
        !matches!(self, SampleStatus::Unavailable { .. })
    }
}

/// Sampler output
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerSample {
    pub records: Vec<TransactionRecord>,
    pub status: SampleStatus,
}

impl LedgerSample {
    pub fn no_activity() -> Self {
        Self {
            records: Vec::new(),
            status: SampleStatus::NoActivity,
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            records: Vec::new(),
            status: SampleStatus::Unavailable {
                reason: reason.into(),
            },
        }
    }
}

/// Aggregator output before the status is collapsed for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotReport {
    pub snapshot: AnalyticsSnapshot,
    pub status: SampleStatus,
}
