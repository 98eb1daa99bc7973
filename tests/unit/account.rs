use crate::common::MockLedgerClient;
use ledger_analytics::analysis::AccountInspector;
use ledger_analytics::config::TOKEN_PROGRAM_ID;
use ledger_analytics::errors::RpcError;
use ledger_analytics::rpc::AccountInfo;
use std::sync::atomic::Ordering;
use std::sync::Arc;

const SYSTEM_PROGRAM: &str = "11111111111111111111111111111111";
const WALLET: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";

#[tokio::test]
async fn test_existing_account() {
    let client = Arc::new(MockLedgerClient::new().with_account(
        WALLET,
        1_500_000_000,
        Some(AccountInfo {
            lamports: 1_500_000_000,
            owner: SYSTEM_PROGRAM.to_string(),
            executable: false,
        }),
    ));
    let inspector = AccountInspector::new(Arc::clone(&client) as _);

    let summary = inspector.inspect(WALLET).await.unwrap();

    assert_eq!(summary.lamports, 1_500_000_000);
    assert_eq!(summary.balance, 1.5);
    assert!(summary.exists);
    assert_eq!(summary.owner.as_deref(), Some(SYSTEM_PROGRAM));
    assert!(!summary.executable);
    assert_eq!(client.balance_calls.load(Ordering::SeqCst), 1);
    assert_eq!(client.account_info_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_executable_program_account() {
    let client = Arc::new(MockLedgerClient::new().with_account(
        TOKEN_PROGRAM_ID,
        4_000_000_000,
        Some(AccountInfo {
            lamports: 4_000_000_000,
            owner: "BPFLoader2111111111111111111111111111111111".to_string(),
            executable: true,
        }),
    ));
    let inspector = AccountInspector::new(Arc::clone(&client) as _);

    let summary = inspector.lookup(TOKEN_PROGRAM_ID).await.unwrap();
    assert!(summary.executable);
    assert_eq!(summary.balance, 4.0);
}

#[tokio::test]
async fn test_unknown_account_reads_as_empty() {
    let client = Arc::new(MockLedgerClient::new());
    let inspector = AccountInspector::new(Arc::clone(&client) as _);

    let summary = inspector.inspect(WALLET).await.unwrap();

    assert_eq!(summary.lamports, 0);
    assert_eq!(summary.balance, 0.0);
    assert!(!summary.exists);
    assert!(summary.owner.is_none());
}

#[tokio::test]
async fn test_malformed_address_makes_no_calls() {
    let client = Arc::new(MockLedgerClient::new());
    let inspector = AccountInspector::new(Arc::clone(&client) as _);

    let too_long = format!("{}1", WALLET);
    for address in ["", "not base58!", "0000", "abc", too_long.as_str()] {
        let result = inspector.inspect(address).await;
        assert!(
            matches!(result, Err(RpcError::InvalidAddress { .. })),
            "{:?} should be rejected",
            address
        );
        assert!(inspector.lookup(address).await.is_none());
    }
    assert_eq!(client.total_calls(), 0);
}

#[tokio::test]
async fn test_provider_failure_is_none() {
    let client = Arc::new(MockLedgerClient::new());
    client.fail_accounts.store(true, Ordering::SeqCst);
    let inspector = AccountInspector::new(Arc::clone(&client) as _);

    assert!(inspector.lookup(WALLET).await.is_none());
    assert!(matches!(
        inspector.inspect(WALLET).await,
        Err(RpcError::CallFailed { .. })
    ));
}
