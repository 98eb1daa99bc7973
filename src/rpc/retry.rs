//! Retry logic utilities for RPC operations
//!
//! This module provides helper functions for implementing exponential backoff
//! retry logic and timeout wrappers for RPC client operations.

use std::future::Future;
use std::time::Duration;
use tokio::time::error::Elapsed;
use tokio::time::timeout;

/// Calculate next backoff duration using exponential backoff with a maximum cap
///
/// This is a pure helper function that implements the exponential backoff formula:
/// `new_backoff = min(current_backoff * multiplier, max_backoff)`
///
/// # Arguments
/// * `current_backoff` - Current backoff duration
/// * `multiplier` - Multiplier for exponential increase (typically 1.5-2.0)
/// * `max_backoff_seconds` - Maximum backoff duration in seconds
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ledger_analytics::rpc::calculate_next_backoff;
///
/// let backoff = Duration::from_millis(100);
/// let next = calculate_next_backoff(backoff, 2.0, 30);
/// assert_eq!(next, Duration::from_millis(200));
/// ```
pub fn calculate_next_backoff(
    current_backoff: Duration,
    multiplier: f64,
    max_backoff_seconds: u64,
) -> Duration {
    Duration::from_millis((current_backoff.as_millis() as f64 * multiplier) as u64)
        .min(Duration::from_secs(max_backoff_seconds))
}

/// Run an RPC future under a timeout
///
/// The outer `Result` reports whether the deadline elapsed; the inner value is
/// whatever the operation itself produced, so callers can tell a slow provider
/// apart from a provider that answered with an error.
pub async fn execute_with_timeout<T, F>(timeout_seconds: u64, operation: F) -> Result<T, Elapsed>
where
    F: Future<Output = T>,
{
    timeout(Duration::from_secs(timeout_seconds), operation).await
}
