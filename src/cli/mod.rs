use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

/// On-chain activity analytics for a Solana-style ledger
#[derive(Parser)]
#[command(name = "ledger-analytics")]
#[command(about = "On-chain activity analytics over a ledger JSON-RPC endpoint")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard JSON API
    Serve(commands::serve::ServeCommand),
    /// Print one analytics snapshot of recent activity
    Snapshot(commands::snapshot::SnapshotCommand),
    /// Print current network throughput figures
    NetworkStats(commands::network_stats::NetworkStatsCommand),
    /// Show balance and ownership of one account
    Account(commands::account::AccountCommand),
    /// Test ledger RPC connectivity
    TestRpc(commands::test_rpc::TestRpcCommand),
}

pub async fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "info" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let cli = Cli::parse();
    let app_config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Serve(command) => command.run(app_config).await,
        Commands::Snapshot(command) => command.run(app_config).await,
        Commands::NetworkStats(command) => command.run(app_config).await,
        Commands::Account(command) => command.run(app_config).await,
        Commands::TestRpc(command) => command.run(app_config).await,
    }
}

/// An explicit file must load; the implicit ./config.toml may be absent
fn load_config(path: Option<&PathBuf>) -> AppResult<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(Some(path.as_path()))
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e))),
        None => Ok(AppConfig::get_defaults()?),
    }
}
