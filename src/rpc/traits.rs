//! Ledger read-client abstraction.
//!
//! Every remote read the analytics layer performs goes through this trait, so
//! the sampler, the network stats cache and the account inspector can be driven
//! by the HTTP client in production and by in-memory fakes in tests. Each
//! method is one logical remote call.

use crate::errors::RpcResult;
use crate::rpc::types::{AccountInfo, ParsedTransaction, PerformanceSample, SignatureInfo};
use async_trait::async_trait;

/// Read-only access to a ledger RPC provider
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Most recent signatures touching any of `addresses`, newest first,
    /// at most `limit` entries
    async fn get_signatures_for_addresses(
        &self,
        addresses: &[String],
        limit: usize,
    ) -> RpcResult<Vec<SignatureInfo>>;

    /// Parsed transaction bodies for `signatures` in one batched request.
    /// The result is index-aligned with the input; misses are `None`.
    async fn get_parsed_transactions(
        &self,
        signatures: &[String],
    ) -> RpcResult<Vec<Option<ParsedTransaction>>>;

    /// Current slot
    async fn get_slot(&self) -> RpcResult<u64>;

    /// Up to `limit` performance samples, newest first
    async fn get_recent_performance_samples(
        &self,
        limit: usize,
    ) -> RpcResult<Vec<PerformanceSample>>;

    /// Balance in lamports
    async fn get_balance(&self, address: &str) -> RpcResult<u64>;

    /// Account metadata, `None` if the account does not exist
    async fn get_account_info(&self, address: &str) -> RpcResult<Option<AccountInfo>>;
}
