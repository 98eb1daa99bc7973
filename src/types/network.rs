//! Network performance banner types

use serde::{Deserialize, Serialize};

/// Cached network performance figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStatsEntry {
    pub tps: u64,
    pub slot: u64,
    pub block_time_ms: u64,
    /// Milliseconds since the Unix epoch
    pub captured_at: i64,
}

impl NetworkStatsEntry {
    pub fn reading(&self, stale: bool) -> NetworkStatsReading {
        NetworkStatsReading {
            success: true,
            tps: self.tps,
            slot: self.slot,
            block_time_ms: self.block_time_ms,
            stale,
        }
    }
}

/// What callers of the cache receive
///
/// Serialises to the dashboard's `{success, tps, slot, blockTime, stale?}` shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStatsReading {
    pub success: bool,
    pub tps: u64,
    pub slot: u64,
    #[serde(rename = "blockTime")]
    pub block_time_ms: u64,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub stale: bool,
}

impl NetworkStatsReading {
    /// Nothing cached and the provider is unreachable
    pub fn unknown(default_block_time_ms: u64) -> Self {
        Self {
            success: false,
            tps: 0,
            slot: 0,
            block_time_ms: default_block_time_ms,
            stale: false,
        }
    }
}
