//! End-to-end Analytics Scenario
//!
//! Three listed signatures: a real transfer, a fee-only transaction and one
//! the batch fetch does not return. Exercises sampler, derivation and
//! aggregation together through the engine.

use crate::common::{
    block_time_ago, engine_for, meta, parsed_tx, signature, test_clock, MockLedgerClient,
};
use ledger_analytics::analysis::aggregator::summarise;
use ledger_analytics::types::{Outcome, SampleStatus};
use std::collections::HashSet;
use std::sync::Arc;

const PAYER: &str = "7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU";
const RECIPIENT: &str = "BrEAK7zGZ6dM71zUDACDqJnekihmwF15noTddWTsknjC";
const FEE_PAYER: &str = "Gm3nVJmZz7UwGuygq6i3JVrLjfqmvsXv4xyfxBpSUdEk";

fn scenario_client() -> Arc<MockLedgerClient> {
    Arc::new(
        MockLedgerClient::new()
            .with_signatures(vec![
                signature("transfer", block_time_ago(30)),
                signature("fee-only", block_time_ago(60)),
                signature("missing", block_time_ago(90)),
            ])
            .with_transaction(
                "transfer",
                parsed_tx(
                    &[PAYER, RECIPIENT],
                    meta(
                        vec![5_000_010_000, 1_000_000_000],
                        vec![3_000_005_000, 3_000_000_000],
                        5_000,
                    ),
                    block_time_ago(30),
                ),
            )
            .with_transaction(
                "fee-only",
                parsed_tx(
                    &[FEE_PAYER, PAYER],
                    meta(vec![1_000_000, 42], vec![995_000, 42], 5_000),
                    block_time_ago(60),
                ),
            ),
    )
}

#[tokio::test]
async fn test_transfer_fee_and_missing_transaction() {
    let client = scenario_client();
    let engine = engine_for(Arc::clone(&client), test_clock());

    let sample = engine.aggregator().sampler().fetch_recent(3).await;

    assert_eq!(sample.records.len(), 2);
    assert_eq!(
        sample.status,
        SampleStatus::Fetched {
            signatures: 3,
            skipped: 1
        }
    );
    assert_eq!(client.sampler_calls(), 2);

    let transfer = &sample.records[0];
    assert_eq!(transfer.signature, "transfer");
    assert_eq!(transfer.amount, 2.0);
    assert_eq!(transfer.outcome, Outcome::Success);

    let fee_only = &sample.records[1];
    assert_eq!(fee_only.signature, "fee-only");
    assert_eq!(fee_only.amount, 0.000005);

    let raw_volume: f64 = sample.records.iter().map(|r| r.amount).sum();
    assert!((raw_volume - 2.000005).abs() < 1e-12);

    let snapshot = engine.aggregator().build_snapshot().await;
    assert_eq!(snapshot.total_transactions, 2);
    // Reported to 2 decimal places
    assert_eq!(snapshot.total_volume, 2.0);
    assert_eq!(snapshot.success_rate, 100.0);

    let distinct: HashSet<&str> = sample
        .records
        .iter()
        .flat_map(|r| [r.sender.as_str(), r.receiver.as_str()])
        .collect();
    // "7xKXtg2C", "BrEAK7zG", "Gm3nVJmZ"
    assert_eq!(distinct.len(), 3);
    assert_eq!(snapshot.active_accounts, distinct.len());

    assert_eq!(snapshot.daily_volume.len(), 7);
    assert_eq!(snapshot.daily_volume[6].transactions, 2);
    assert_eq!(snapshot.daily_volume[6].value, 2.0);
}

#[tokio::test]
async fn test_snapshot_json_shape() {
    let client = scenario_client();
    let engine = engine_for(Arc::clone(&client), test_clock());

    let records = engine.aggregator().sampler().recent_transactions(3).await;
    let snapshot = summarise(&records, crate::common::TEST_NOW_MS, 10);
    let json = serde_json::to_value(&snapshot).unwrap();

    for field in [
        "totalTransactions",
        "totalVolume",
        "successRate",
        "activeAccounts",
        "recentTransactions",
        "programDistribution",
        "dailyVolume",
    ] {
        assert!(json.get(field).is_some(), "missing {}", field);
    }

    let first = &json["recentTransactions"][0];
    assert_eq!(first["signature"], "transfer");
    assert_eq!(first["outcome"], "success");
    assert_eq!(first["sender"], "7xKXtg2C");
    assert_eq!(first["observedAt"], crate::common::TEST_NOW_MS - 30_000);
    assert_eq!(json["programDistribution"][0]["name"], "Smart Contract");
    assert_eq!(json["programDistribution"][0]["count"], 2);
}
