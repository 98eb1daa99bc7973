//! Centralised analytics module
//!
//! This module turns raw ledger reads into dashboard statistics. It is
//! organised around the `AnalyticsEngine`, which wires one shared ledger
//! client into every component:
//!
//! - **Sampler** - Two-call sample of recent activity for the tracked programs
//! - **Aggregator** - Success rate, volume, accounts, categories and daily buckets
//! - **Network Stats** - TTL-cached throughput figures (see `rpc::cache`)
//! - **Accounts** - Balance and ownership of a single address
//! - **Reports** - Console and JSON formatting for the CLI
//!
//! ## Usage
//!
//! ```no_run
//! use ledger_analytics::analysis::AnalyticsEngine;
//! use ledger_analytics::config::AppConfig;
//! use ledger_analytics::errors::AppResult;
//!
//! async fn example() -> AppResult<()> {
//!     let engine = AnalyticsEngine::from_config(&AppConfig::default())?;
//!
//!     let snapshot = engine.aggregator().build_snapshot().await;
//!     let network = engine.network_stats().get().await;
//!     println!("{} sampled, {} TPS", snapshot.total_transactions, network.tps);
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod aggregator;
pub mod categories;
pub mod report;
pub mod sampler;

pub use account::AccountInspector;
pub use aggregator::AnalyticsAggregator;
pub use categories::ProgramCategories;
pub use report::{OutputFormat, ReportFormatter};
pub use sampler::LedgerSampler;

use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::rpc::{LedgerClient, NetworkStatsCache, SolanaRpcClient};
use crate::utils::time::{Clock, SystemClock};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Main analytics engine owning every component behind the dashboard
pub struct AnalyticsEngine {
    aggregator: AnalyticsAggregator,
    network_stats: NetworkStatsCache,
    accounts: AccountInspector,
}

impl AnalyticsEngine {
    /// Create an engine backed by the configured JSON-RPC endpoint
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let client = SolanaRpcClient::new(config.rpc.clone())?;
        info!("Using ledger RPC endpoint {}", client.endpoint());
        Ok(Self::with_client(config, Arc::new(client), Arc::new(SystemClock)))
    }

    /// Create an engine around an existing client and clock
    pub fn with_client(
        config: &AppConfig,
        client: Arc<dyn LedgerClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let sampler = LedgerSampler::new(
            Arc::clone(&client),
            config.sampling.tracked_programs.clone(),
            ProgramCategories::from_config(&config.categories),
            Arc::clone(&clock),
        );
        let aggregator = AnalyticsAggregator::new(
            sampler,
            Arc::clone(&clock),
            config.sampling.sample_size,
            config.sampling.recent_display_limit,
        );
        let network_stats = NetworkStatsCache::new(
            Arc::clone(&client),
            clock,
            Duration::from_secs(config.network_stats.ttl_seconds),
            config.network_stats.default_block_time_ms,
        );
        let accounts = AccountInspector::new(client);

        Self {
            aggregator,
            network_stats,
            accounts,
        }
    }

    pub fn aggregator(&self) -> &AnalyticsAggregator {
        &self.aggregator
    }

    pub fn network_stats(&self) -> &NetworkStatsCache {
        &self.network_stats
    }

    pub fn accounts(&self) -> &AccountInspector {
        &self.accounts
    }
}
