//! Ledger Analytics
//!
//! Live activity statistics for a Solana-style ledger, sampled over JSON-RPC
//! and served to a dashboard.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod errors;
pub mod rpc;
pub mod server;
pub mod types;
pub mod utils;
