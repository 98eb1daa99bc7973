//! Common Test Utilities
//!
//! In-memory ledger client with per-method call counters and scripted
//! failures, plus builders for the wire types the sampler consumes.

#![allow(dead_code)]

pub mod fake_rpc_server;

use async_trait::async_trait;
use ledger_analytics::analysis::{AnalyticsEngine, LedgerSampler, ProgramCategories};
use ledger_analytics::config::{AppConfig, TOKEN_PROGRAM_ID};
use ledger_analytics::errors::{RpcError, RpcResult};
use ledger_analytics::rpc::types::{
    AccountKey, ParsedMessage, TransactionEnvelope, TransactionMeta,
};
use ledger_analytics::rpc::{
    AccountInfo, LedgerClient, ParsedTransaction, PerformanceSample, SignatureInfo,
};
use ledger_analytics::utils::time::ManualClock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// 2024-01-07 12:00:00 UTC, a Sunday
pub const TEST_NOW_MS: i64 = 1_704_628_800_000;

/// Scripted ledger client
#[derive(Default)]
pub struct MockLedgerClient {
    signatures: Mutex<Vec<SignatureInfo>>,
    transactions: Mutex<HashMap<String, ParsedTransaction>>,
    performance_samples: Mutex<Vec<PerformanceSample>>,
    slot: AtomicU64,
    balances: Mutex<HashMap<String, u64>>,
    accounts: Mutex<HashMap<String, AccountInfo>>,

    pub fail_signatures: AtomicBool,
    pub fail_transactions: AtomicBool,
    pub fail_network: AtomicBool,
    pub fail_accounts: AtomicBool,

    pub signature_calls: AtomicUsize,
    pub transaction_calls: AtomicUsize,
    pub slot_calls: AtomicUsize,
    pub performance_calls: AtomicUsize,
    pub balance_calls: AtomicUsize,
    pub account_info_calls: AtomicUsize,

    pub last_signature_limit: AtomicUsize,
    pub last_addresses: Mutex<Vec<String>>,
}

impl MockLedgerClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signatures(self, signatures: Vec<SignatureInfo>) -> Self {
        *self.signatures.lock().unwrap() = signatures;
        self
    }

    pub fn with_transaction(self, signature: &str, tx: ParsedTransaction) -> Self {
        self.transactions
            .lock()
            .unwrap()
            .insert(signature.to_string(), tx);
        self
    }

    pub fn with_performance_sample(self, sample: PerformanceSample) -> Self {
        self.performance_samples.lock().unwrap().push(sample);
        self
    }

    pub fn with_slot(self, slot: u64) -> Self {
        self.slot.store(slot, Ordering::SeqCst);
        self
    }

    pub fn with_account(self, address: &str, lamports: u64, info: Option<AccountInfo>) -> Self {
        self.balances
            .lock()
            .unwrap()
            .insert(address.to_string(), lamports);
        if let Some(info) = info {
            self.accounts
                .lock()
                .unwrap()
                .insert(address.to_string(), info);
        }
        self
    }

    pub fn set_slot(&self, slot: u64) {
        self.slot.store(slot, Ordering::SeqCst);
    }

    pub fn set_network_failure(&self, fail: bool) {
        self.fail_network.store(fail, Ordering::SeqCst);
    }

    /// Remote calls issued by the sampler
    pub fn sampler_calls(&self) -> usize {
        self.signature_calls.load(Ordering::SeqCst) + self.transaction_calls.load(Ordering::SeqCst)
    }

    /// Remote calls issued by the network stats cache
    pub fn network_calls(&self) -> usize {
        self.slot_calls.load(Ordering::SeqCst) + self.performance_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.sampler_calls()
            + self.network_calls()
            + self.balance_calls.load(Ordering::SeqCst)
            + self.account_info_calls.load(Ordering::SeqCst)
    }
}

fn scripted_failure(method: &str) -> RpcError {
    RpcError::CallFailed {
        method: method.to_string(),
        message: "scripted failure".to_string(),
    }
}

#[async_trait]
impl LedgerClient for MockLedgerClient {
    async fn get_signatures_for_addresses(
        &self,
        addresses: &[String],
        limit: usize,
    ) -> RpcResult<Vec<SignatureInfo>> {
        self.signature_calls.fetch_add(1, Ordering::SeqCst);
        self.last_signature_limit.store(limit, Ordering::SeqCst);
        *self.last_addresses.lock().unwrap() = addresses.to_vec();

        if self.fail_signatures.load(Ordering::SeqCst) {
            return Err(scripted_failure("getSignaturesForAddress"));
        }
        let signatures = self.signatures.lock().unwrap();
        Ok(signatures.iter().take(limit).cloned().collect())
    }

    async fn get_parsed_transactions(
        &self,
        signatures: &[String],
    ) -> RpcResult<Vec<Option<ParsedTransaction>>> {
        self.transaction_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_transactions.load(Ordering::SeqCst) {
            return Err(scripted_failure("getTransaction"));
        }
        let transactions = self.transactions.lock().unwrap();
        Ok(signatures
            .iter()
            .map(|signature| transactions.get(signature).cloned())
            .collect())
    }

    async fn get_slot(&self) -> RpcResult<u64> {
        self.slot_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_network.load(Ordering::SeqCst) {
            return Err(scripted_failure("getSlot"));
        }
        Ok(self.slot.load(Ordering::SeqCst))
    }

    async fn get_recent_performance_samples(
        &self,
        limit: usize,
    ) -> RpcResult<Vec<PerformanceSample>> {
        self.performance_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_network.load(Ordering::SeqCst) {
            return Err(scripted_failure("getRecentPerformanceSamples"));
        }
        let samples = self.performance_samples.lock().unwrap();
        Ok(samples.iter().take(limit).cloned().collect())
    }

    async fn get_balance(&self, address: &str) -> RpcResult<u64> {
        self.balance_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_accounts.load(Ordering::SeqCst) {
            return Err(scripted_failure("getBalance"));
        }
        Ok(self
            .balances
            .lock()
            .unwrap()
            .get(address)
            .copied()
            .unwrap_or(0))
    }

    async fn get_account_info(&self, address: &str) -> RpcResult<Option<AccountInfo>> {
        self.account_info_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_accounts.load(Ordering::SeqCst) {
            return Err(scripted_failure("getAccountInfo"));
        }
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }
}

// ===== Builders =====

pub fn signature(sig: &str, block_time: Option<i64>) -> SignatureInfo {
    SignatureInfo::new(sig, block_time)
}

pub fn meta(pre_balances: Vec<u64>, post_balances: Vec<u64>, fee: u64) -> TransactionMeta {
    TransactionMeta {
        err: None,
        fee,
        pre_balances,
        post_balances,
    }
}

pub fn failed_meta(pre_balances: Vec<u64>, post_balances: Vec<u64>, fee: u64) -> TransactionMeta {
    TransactionMeta {
        err: Some(serde_json::json!({ "InstructionError": [0, "InvalidArgument"] })),
        ..meta(pre_balances, post_balances, fee)
    }
}

pub fn parsed_tx(keys: &[&str], meta: TransactionMeta, block_time: Option<i64>) -> ParsedTransaction {
    ParsedTransaction {
        slot: 250_000_000,
        block_time,
        meta: Some(meta),
        transaction: TransactionEnvelope {
            message: ParsedMessage {
                account_keys: keys
                    .iter()
                    .enumerate()
                    .map(|(i, key)| AccountKey {
                        pubkey: key.to_string(),
                        signer: i == 0,
                        writable: true,
                    })
                    .collect(),
            },
            signatures: Vec::new(),
        },
    }
}

pub fn performance_sample(num_transactions: u64, num_slots: u64, period_secs: u64) -> PerformanceSample {
    PerformanceSample {
        slot: 250_000_000,
        num_transactions,
        num_slots,
        sample_period_secs: period_secs,
    }
}

/// Block time in seconds `secs_ago` before `TEST_NOW_MS`
pub fn block_time_ago(secs_ago: i64) -> Option<i64> {
    Some(TEST_NOW_MS / 1000 - secs_ago)
}

// ===== Wiring =====

pub fn test_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(TEST_NOW_MS))
}

pub fn sampler_for(client: Arc<MockLedgerClient>, clock: Arc<ManualClock>) -> LedgerSampler {
    LedgerSampler::new(
        client,
        vec![TOKEN_PROGRAM_ID.to_string()],
        ProgramCategories::default(),
        clock,
    )
}

pub fn engine_for(client: Arc<MockLedgerClient>, clock: Arc<ManualClock>) -> AnalyticsEngine {
    AnalyticsEngine::with_client(&AppConfig::default(), client, clock)
}
