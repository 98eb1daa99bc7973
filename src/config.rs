use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::warn;

/// SPL Token program, the default tracked identifier
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub rpc: LedgerRpcConfig,
    pub sampling: SamplingConfig,
    #[serde(default)]
    pub categories: CategoryConfig,
    pub network_stats: NetworkStatsConfig,
    pub server: ServerConfig,
}

/// Ledger JSON-RPC endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRpcConfig {
    pub url: String,
    pub commitment: String,
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
}

impl Default for LedgerRpcConfig {
    fn default() -> Self {
        Self {
            url: "https://api.mainnet-beta.solana.com".to_string(),
            commitment: "confirmed".to_string(),
            timeout_seconds: 15,
            max_retries: 3,
            initial_backoff_ms: 250,
            backoff_multiplier: 2.0,
            max_backoff_seconds: 5,
        }
    }
}

/// Which identifiers are sampled and how much of the sample is shown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(default = "default_tracked_programs")]
    pub tracked_programs: Vec<String>,
    pub sample_size: usize,
    pub recent_display_limit: usize,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            tracked_programs: default_tracked_programs(),
            sample_size: 15,
            recent_display_limit: 10,
        }
    }
}

fn default_tracked_programs() -> Vec<String> {
    vec![TOKEN_PROGRAM_ID.to_string()]
}

/// Program identifier → human-readable category table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    #[serde(default = "default_category_label")]
    pub default_label: String,
    #[serde(default = "default_category_labels")]
    pub labels: Vec<ProgramLabel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramLabel {
    pub program_id: String,
    pub label: String,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            default_label: default_category_label(),
            labels: default_category_labels(),
        }
    }
}

fn default_category_label() -> String {
    "Smart Contract".to_string()
}

fn default_category_labels() -> Vec<ProgramLabel> {
    [
        (TOKEN_PROGRAM_ID, "Token Transfer"),
        (
            "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL",
            "Associated Token",
        ),
        ("11111111111111111111111111111111", "System Transfer"),
        ("ComputeBudget111111111111111111111111111111", "Compute Budget"),
    ]
    .into_iter()
    .map(|(program_id, label)| ProgramLabel {
        program_id: program_id.to_string(),
        label: label.to_string(),
    })
    .collect()
}

/// Network performance banner cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkStatsConfig {
    pub ttl_seconds: u64,
    pub default_block_time_ms: u64,
}

impl Default for NetworkStatsConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: 10,
            default_block_time_ms: 400,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc: LedgerRpcConfig::default(),
            sampling: SamplingConfig::default(),
            categories: CategoryConfig::default(),
            network_stats: NetworkStatsConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of ./config.toml when given
    ///
    /// Nested keys are overridden with `LEDGER_<SECTION>__<KEY>` variables,
    /// e.g. `LEDGER_RPC__URL` or `LEDGER_SAMPLING__SAMPLE_SIZE`.
    /// `LEDGER_SAMPLING__TRACKED_PROGRAMS` takes a comma-separated list.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let rpc = LedgerRpcConfig::default();
        let sampling = SamplingConfig::default();
        let stats = NetworkStatsConfig::default();
        let server = ServerConfig::default();

        let file_source = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("config").required(false),
        };

        let config = Config::builder()
            // Ledger RPC defaults
            .set_default("rpc.url", rpc.url)?
            .set_default("rpc.commitment", rpc.commitment)?
            .set_default("rpc.timeout_seconds", rpc.timeout_seconds)?
            .set_default("rpc.max_retries", rpc.max_retries as i64)?
            .set_default("rpc.initial_backoff_ms", rpc.initial_backoff_ms)?
            .set_default("rpc.backoff_multiplier", rpc.backoff_multiplier)?
            .set_default("rpc.max_backoff_seconds", rpc.max_backoff_seconds)?
            // Sampling defaults (tracked_programs falls back through serde)
            .set_default("sampling.sample_size", sampling.sample_size as i64)?
            .set_default(
                "sampling.recent_display_limit",
                sampling.recent_display_limit as i64,
            )?
            .set_default("network_stats.ttl_seconds", stats.ttl_seconds)?
            .set_default(
                "network_stats.default_block_time_ms",
                stats.default_block_time_ms,
            )?
            .set_default("server.bind_address", server.bind_address)?
            .add_source(file_source)
            .add_source(
                config::Environment::with_prefix("LEDGER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("sampling.tracked_programs"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Conventional variable understood by most Solana tooling
        if let Ok(url) = env::var("SOLANA_RPC_URL") {
            if !url.trim().is_empty() {
                app_config.rpc.url = url;
            }
        }

        app_config.validate()?;
        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Result<Self, ConfigError> {
        // Try to load config for defaults, but don't fail if not found
        match Self::load() {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("Ignoring configuration ({}), using built-in defaults", e);
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.sampling.sample_size == 0 {
            return Err(ConfigError::Message(
                "sampling.sample_size must be at least 1".to_string(),
            ));
        }
        if self.sampling.tracked_programs.is_empty() {
            return Err(ConfigError::Message(
                "sampling.tracked_programs must name at least one program".to_string(),
            ));
        }
        if self.rpc.url.trim().is_empty() {
            return Err(ConfigError::Message("rpc.url is empty".to_string()));
        }
        Ok(())
    }
}
