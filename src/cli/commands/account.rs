use crate::analysis::{AnalyticsEngine, OutputFormat, ReportFormatter};
use crate::config::AppConfig;
use crate::errors::AppResult;
use clap::Args;

/// Show balance and ownership of one account
#[derive(Args)]
pub struct AccountCommand {
    /// Base58 account address
    pub address: String,

    /// Output format: console or json
    #[arg(long, default_value = "console")]
    pub format: String,
}

impl AccountCommand {
    pub async fn run(&self, app_config: AppConfig) -> AppResult<()> {
        let engine = AnalyticsEngine::from_config(&app_config)?;
        let summary = engine.accounts().inspect(&self.address).await?;

        let output = ReportFormatter::format_account(
            &self.address,
            &summary,
            OutputFormat::parse(&self.format),
        )?;
        print!("{}", output);
        Ok(())
    }
}
