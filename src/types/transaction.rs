//! Normalised transaction record

use serde::{Deserialize, Serialize};

/// Whether the ledger reported an execution error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failed,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
    }
}

/// One sampled ledger entry, reduced to what the dashboard displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Unique ledger entry identifier
    pub signature: String,

    /// Label from the program category table
    pub category: String,

    /// Truncated first account key, or the placeholder
    pub sender: String,

    /// Truncated second account key, or the placeholder
    pub receiver: String,

    /// Largest balance movement in display units, never negative
    pub amount: f64,

    /// Milliseconds since the Unix epoch, never later than processing time
    pub observed_at: i64,

    pub outcome: Outcome,
}
