//! Ledger RPC integration module
//!
//! This module provides all ledger RPC-related functionality including:
//! - **Traits** - The `LedgerClient` seam every remote read goes through
//! - **Client** - reqwest-based JSON-RPC client with batching and retry logic
//! - **Cache** - Time-boxed cache for network performance metrics
//! - **Retry** - Exponential backoff retry utilities and timeout wrappers
//! - **Types** - Wire types for the JSON-RPC responses we read

pub mod cache;
pub mod client;
pub mod retry;
pub mod traits;
pub mod types;

// Re-export main types
pub use cache::{CacheStats, NetworkStatsCache};
pub use client::SolanaRpcClient;
pub use retry::{calculate_next_backoff, execute_with_timeout};
pub use traits::LedgerClient;
pub use types::{AccountInfo, ParsedTransaction, PerformanceSample, SignatureInfo};
