//! Recent ledger activity sampler
//!
//! Produces a bounded, newest-first slice of normalised transaction records for
//! the tracked programs using exactly two remote reads: one signature listing
//! and one batched fetch of the parsed transaction bodies. Remote failures are
//! reduced to an empty sample with an `Unavailable` status, never an error.

use crate::analysis::categories::ProgramCategories;
use crate::rpc::traits::LedgerClient;
use crate::rpc::types::{ParsedTransaction, SignatureInfo, TransactionMeta};
use crate::types::{LedgerSample, Outcome, SampleStatus, TransactionRecord};
use crate::utils::currency::lamports_to_sol;
use crate::utils::time::{block_time_to_ms, Clock};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Sample size used by the dashboard
pub const DEFAULT_SAMPLE_LIMIT: usize = 15;

/// Provider cap for one signature listing
pub const MAX_SIGNATURE_LIMIT: usize = 1000;

/// Stand-in fee when a transaction reports none
pub const DEFAULT_FEE_LAMPORTS: u64 = 5_000;

/// Characters of an account key kept for display
pub const ACCOUNT_DISPLAY_CHARS: usize = 8;

/// Shown when a transaction has too few account keys
pub const PLACEHOLDER_ACCOUNT: &str = "—";

pub struct LedgerSampler {
    client: Arc<dyn LedgerClient>,
    tracked_programs: Vec<String>,
    categories: ProgramCategories,
    clock: Arc<dyn Clock>,
}

impl LedgerSampler {
    pub fn new(
        client: Arc<dyn LedgerClient>,
        tracked_programs: Vec<String>,
        categories: ProgramCategories,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client,
            tracked_programs,
            categories,
            clock,
        }
    }

    pub fn tracked_programs(&self) -> &[String] {
        &self.tracked_programs
    }

    /// Sample up to `limit` recent transactions with their status
    pub async fn fetch_recent(&self, limit: usize) -> LedgerSample {
        let limit = limit.clamp(1, MAX_SIGNATURE_LIMIT);

        let mut signatures = match self
            .client
            .get_signatures_for_addresses(&self.tracked_programs, limit)
            .await
        {
            Ok(signatures) => signatures,
            Err(e) => {
                warn!("Signature listing failed, returning empty sample: {}", e);
                return LedgerSample::unavailable(e.to_string());
            }
        };

        if signatures.is_empty() {
            debug!("No recent signatures for {:?}", self.tracked_programs);
            return LedgerSample::no_activity();
        }
        signatures.truncate(limit);

        let ids: Vec<String> = signatures.iter().map(|s| s.signature.clone()).collect();
        let bodies = match self.client.get_parsed_transactions(&ids).await {
            Ok(bodies) => bodies,
            Err(e) => {
                warn!("Batched transaction fetch failed, returning empty sample: {}", e);
                return LedgerSample::unavailable(e.to_string());
            }
        };

        if bodies.len() != signatures.len() {
            warn!(
                "Provider returned {} transaction bodies for {} signatures",
                bodies.len(),
                signatures.len()
            );
        }

        let now = self.clock.now_ms();
        let records: Vec<TransactionRecord> = signatures
            .iter()
            .zip(bodies.iter())
            .filter_map(|(info, body)| {
                body.as_ref()
                    .and_then(|tx| derive_record(info, tx, &self.categories, now))
            })
            .collect();

        let skipped = signatures.len() - records.len();
        if skipped > 0 {
            debug!("Skipped {} transactions without a usable body", skipped);
        }
        info!(
            "Sampled {} of {} recent transactions",
            records.len(),
            signatures.len()
        );

        LedgerSample {
            records,
            status: SampleStatus::Fetched {
                signatures: signatures.len(),
                skipped,
            },
        }
    }

    /// Records only; failures read as an empty list
    pub async fn recent_transactions(&self, limit: usize) -> Vec<TransactionRecord> {
        self.fetch_recent(limit).await.records
    }
}

/// Normalise one (signature, parsed transaction) pair
///
/// Returns `None` when the transaction has no status metadata.
pub fn derive_record(
    info: &SignatureInfo,
    tx: &ParsedTransaction,
    categories: &ProgramCategories,
    now_ms: i64,
) -> Option<TransactionRecord> {
    let meta = tx.meta.as_ref()?;
    let mut keys = tx.account_keys();
    let first = keys.next();
    let second = keys.next();

    let observed_at = info
        .block_time
        .or(tx.block_time)
        .map(|secs| block_time_to_ms(secs).min(now_ms))
        .unwrap_or(now_ms);

    Some(TransactionRecord {
        signature: info.signature.clone(),
        category: categories.label_for(first.unwrap_or_default()).to_string(),
        sender: first.map(truncate_account).unwrap_or_else(placeholder),
        receiver: second.map(truncate_account).unwrap_or_else(placeholder),
        amount: derive_amount(meta),
        observed_at,
        outcome: if meta.err.is_some() {
            Outcome::Failed
        } else {
            Outcome::Success
        },
    })
}

/// Value moved by a transaction, in SOL
///
/// The largest balance change among non-fee-payer accounts; when nothing moved
/// the fee stands in so the record never reads as zero.
pub fn derive_amount(meta: &TransactionMeta) -> f64 {
    match largest_balance_delta(meta) {
        0 => {
            let fee = if meta.fee > 0 {
                meta.fee
            } else {
                DEFAULT_FEE_LAMPORTS
            };
            lamports_to_sol(fee)
        }
        delta => lamports_to_sol(delta),
    }
}

/// Largest |post - pre| over account indices 1.., in lamports
///
/// Index 0 is the fee payer and is excluded.
pub fn largest_balance_delta(meta: &TransactionMeta) -> u64 {
    meta.pre_balances
        .iter()
        .zip(meta.post_balances.iter())
        .skip(1)
        .map(|(pre, post)| pre.abs_diff(*post))
        .max()
        .unwrap_or(0)
}

/// First characters of an account key for display
pub fn truncate_account(key: &str) -> String {
    if key.is_empty() {
        return placeholder();
    }
    key.chars().take(ACCOUNT_DISPLAY_CHARS).collect()
}

fn placeholder() -> String {
    PLACEHOLDER_ACCOUNT.to_string()
}
