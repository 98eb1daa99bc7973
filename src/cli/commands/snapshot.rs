use crate::analysis::{AnalyticsEngine, OutputFormat, ReportFormatter};
use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::types::SampleStatus;
use clap::Args;
use tracing::warn;

/// Print one analytics snapshot of recent activity
#[derive(Args)]
pub struct SnapshotCommand {
    /// Output format: console or json
    #[arg(long, default_value = "console")]
    pub format: String,

    /// Number of recent transactions to sample (overrides sampling.sample_size)
    #[arg(long)]
    pub sample_size: Option<usize>,
}

impl SnapshotCommand {
    pub async fn run(&self, mut app_config: AppConfig) -> AppResult<()> {
        if let Some(size) = self.sample_size {
            app_config.sampling.sample_size = size.max(1);
        }

        let engine = AnalyticsEngine::from_config(&app_config)?;
        let report = engine.aggregator().build_report().await;

        if let SampleStatus::Unavailable { reason } = &report.status {
            warn!("Live data temporarily unavailable: {}", reason);
        }

        let output =
            ReportFormatter::format_snapshot(&report.snapshot, OutputFormat::parse(&self.format))?;
        print!("{}", output);
        Ok(())
    }
}
