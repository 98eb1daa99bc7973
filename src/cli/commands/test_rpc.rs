use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::rpc::SolanaRpcClient;
use clap::Args;
use tracing::{error, info};

/// Test ledger RPC connectivity
#[derive(Args)]
pub struct TestRpcCommand {
    /// JSON-RPC endpoint URL (overrides configuration)
    #[arg(long)]
    pub rpc_url: Option<String>,
}

impl TestRpcCommand {
    pub async fn run(&self, app_config: AppConfig) -> AppResult<()> {
        info!("=== Testing Ledger RPC Connection ===");

        let mut rpc_config = app_config.rpc;
        if let Some(url) = &self.rpc_url {
            rpc_config.url = url.clone();
        }

        info!("Testing connection to: {}", rpc_config.url);
        info!("Commitment: {}", rpc_config.commitment);

        let client = match SolanaRpcClient::new(rpc_config) {
            Ok(client) => client,
            Err(e) => {
                error!("Failed to create RPC client: {}", e);
                return Err(AppError::Config(format!(
                    "RPC client creation failed: {}",
                    e
                )));
            }
        };

        match client.test_connection().await {
            Ok(slot) => {
                println!("Ledger RPC connection test PASSED");
                println!("Current slot: {}", slot);
                Ok(())
            }
            Err(e) => {
                error!("RPC connection test failed: {}", e);
                println!("Ledger RPC connection test FAILED");
                println!("Error: {}", e);
                println!("\nTroubleshooting tips:");
                println!("1. Verify the RPC URL is correct");
                println!("2. Check whether the provider rate-limits your IP");
                println!("3. Try a dedicated endpoint via SOLANA_RPC_URL");

                Err(AppError::Rpc(e))
            }
        }
    }
}
