use crate::analysis::{AnalyticsEngine, OutputFormat, ReportFormatter};
use crate::config::AppConfig;
use crate::errors::AppResult;
use clap::Args;

/// Print current network throughput figures
#[derive(Args)]
pub struct NetworkStatsCommand {
    /// Output format: console or json
    #[arg(long, default_value = "console")]
    pub format: String,
}

impl NetworkStatsCommand {
    pub async fn run(&self, app_config: AppConfig) -> AppResult<()> {
        let engine = AnalyticsEngine::from_config(&app_config)?;
        let reading = engine.network_stats().get().await;

        let output =
            ReportFormatter::format_network_stats(&reading, OutputFormat::parse(&self.format))?;
        print!("{}", output);
        Ok(())
    }
}
