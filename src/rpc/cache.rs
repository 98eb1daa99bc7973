use crate::errors::RpcResult;
use crate::rpc::traits::LedgerClient;
use crate::rpc::types::PerformanceSample;
use crate::types::network::{NetworkStatsEntry, NetworkStatsReading};
use crate::utils::time::Clock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

/// Time-boxed cache in front of the network performance calls
///
/// While the stored entry is younger than the TTL every `get` is served from
/// memory. Once it expires the next `get` refreshes it with one
/// performance-sample read and one slot read issued concurrently. A failed
/// refresh hands back the expired entry flagged as stale.
pub struct NetworkStatsCache {
    client: Arc<dyn LedgerClient>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
    default_block_time_ms: u64,
    entry: Mutex<Option<NetworkStatsEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
    refresh_failures: AtomicU64,
}

impl NetworkStatsCache {
    pub fn new(
        client: Arc<dyn LedgerClient>,
        clock: Arc<dyn Clock>,
        ttl: Duration,
        default_block_time_ms: u64,
    ) -> Self {
        Self {
            client,
            clock,
            ttl,
            default_block_time_ms,
            entry: Mutex::new(None),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            refresh_failures: AtomicU64::new(0),
        }
    }

    /// Current network stats, from cache when fresh
    pub async fn get(&self) -> NetworkStatsReading {
        let now = self.clock.now_ms();
        let cached = self.entry();

        if let Some(entry) = cached.filter(|entry| self.is_fresh(entry, now)) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("Network stats cache hit (age {}ms)", now - entry.captured_at);
            return entry.reading(false);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);

        match self.refresh(now).await {
            Ok(entry) => {
                self.store(entry);
                entry.reading(false)
            }
            Err(e) => {
                self.refresh_failures.fetch_add(1, Ordering::Relaxed);
                match cached {
                    Some(entry) => {
                        warn!("Network stats refresh failed, serving stale entry: {}", e);
                        entry.reading(true)
                    }
                    None => {
                        warn!("Network stats refresh failed with nothing cached: {}", e);
                        NetworkStatsReading::unknown(self.default_block_time_ms)
                    }
                }
            }
        }
    }

    /// The stored entry, fresh or not
    pub fn entry(&self) -> Option<NetworkStatsEntry> {
        *self.entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Get cache statistics
    pub fn get_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            refresh_failures: self.refresh_failures.load(Ordering::Relaxed),
        }
    }

    fn is_fresh(&self, entry: &NetworkStatsEntry, now: i64) -> bool {
        now - entry.captured_at < self.ttl.as_millis() as i64
    }

    fn store(&self, entry: NetworkStatsEntry) {
        // Last write wins when two refreshes race
        *self.entry.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(entry);
    }

    async fn refresh(&self, now: i64) -> RpcResult<NetworkStatsEntry> {
        let (samples, slot) = tokio::try_join!(
            self.client.get_recent_performance_samples(1),
            self.client.get_slot(),
        )?;

        let (tps, block_time_ms) = derive_throughput(samples.first(), self.default_block_time_ms);
        debug!(
            "Network stats refreshed: {} TPS, slot {}, {}ms blocks",
            tps, slot, block_time_ms
        );

        Ok(NetworkStatsEntry {
            tps,
            slot,
            block_time_ms,
            captured_at: now,
        })
    }
}

/// Transactions per second and average block interval from one sample
pub fn derive_throughput(sample: Option<&PerformanceSample>, default_block_time_ms: u64) -> (u64, u64) {
    let Some(sample) = sample else {
        return (0, default_block_time_ms);
    };

    let period = sample.sample_period_secs as f64;
    let tps = if sample.sample_period_secs > 0 {
        (sample.num_transactions as f64 / period).round() as u64
    } else {
        0
    };
    let block_time_ms = if sample.num_slots > 0 {
        ((period / sample.num_slots as f64) * 1000.0).round() as u64
    } else {
        default_block_time_ms
    };

    (tps, block_time_ms)
}

/// Cache performance statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub refresh_failures: u64,
}

impl CacheStats {
    /// Calculate the cache hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        if self.hits + self.misses == 0 {
            0.0
        } else {
            (self.hits as f64 / (self.hits + self.misses) as f64) * 100.0
        }
    }

    /// Get total cache requests
    pub fn total_requests(&self) -> u64 {
        self.hits + self.misses
    }
}
