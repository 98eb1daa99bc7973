//! Single-account lookup
//!
//! Balance and ownership of one address. Malformed addresses are rejected
//! before any remote call is made.

use crate::errors::{RpcError, RpcResult};
use crate::rpc::traits::LedgerClient;
use crate::types::AccountSummary;
use crate::utils::currency::lamports_to_sol;
use std::sync::Arc;
use tracing::{debug, warn};

/// Decoded length of an account address
pub const ADDRESS_BYTES: usize = 32;

pub struct AccountInspector {
    client: Arc<dyn LedgerClient>,
}

impl AccountInspector {
    pub fn new(client: Arc<dyn LedgerClient>) -> Self {
        Self { client }
    }

    /// Account summary, or `None` for a malformed address or provider failure
    pub async fn lookup(&self, address: &str) -> Option<AccountSummary> {
        match self.inspect(address).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                warn!("Account lookup for {} failed: {}", address, e);
                None
            }
        }
    }

    /// Account summary with the reason for failure kept
    pub async fn inspect(&self, address: &str) -> RpcResult<AccountSummary> {
        validate_address(address)?;

        let (lamports, info) = tokio::try_join!(
            self.client.get_balance(address),
            self.client.get_account_info(address),
        )?;
        debug!("Account {} holds {} lamports", address, lamports);

        Ok(AccountSummary {
            balance: lamports_to_sol(lamports),
            lamports,
            exists: info.is_some(),
            owner: info.as_ref().map(|i| i.owner.clone()),
            executable: info.map(|i| i.executable).unwrap_or(false),
        })
    }
}

/// Check that `address` is base58 and decodes to 32 bytes
pub fn validate_address(address: &str) -> RpcResult<()> {
    let invalid = || RpcError::InvalidAddress {
        address: address.to_string(),
    };

    let bytes = bs58::decode(address).into_vec().map_err(|_| invalid())?;
    if bytes.len() != ADDRESS_BYTES {
        return Err(invalid());
    }
    Ok(())
}
