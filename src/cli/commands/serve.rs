use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::server;
use clap::Args;

/// Serve the dashboard JSON API
#[derive(Args)]
pub struct ServeCommand {
    /// Address to listen on (defaults to server.bind_address)
    #[arg(long)]
    pub bind: Option<String>,
}

impl ServeCommand {
    pub async fn run(&self, app_config: AppConfig) -> AppResult<()> {
        server::serve(&app_config, self.bind.as_deref()).await
    }
}
