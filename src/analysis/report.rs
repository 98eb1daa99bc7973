//! Report formatting for the CLI
//!
//! Console output for humans, pretty JSON for scripts. The HTTP surface
//! serialises the same types directly and does not go through here.

use crate::errors::{AppError, AppResult};
use crate::types::{AccountSummary, AnalyticsSnapshot, NetworkStatsReading};
use crate::utils::currency::format_lamports_as_sol;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Output format options for CLI reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
}

impl OutputFormat {
    /// Parse output format string, falling back to console
    pub fn parse(format_str: &str) -> Self {
        match format_str.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Console,
        }
    }
}

/// Facade for all report formatting operations
pub struct ReportFormatter;

impl ReportFormatter {
    pub fn format_snapshot(snapshot: &AnalyticsSnapshot, format: OutputFormat) -> AppResult<String> {
        if format == OutputFormat::Json {
            return export_json(snapshot);
        }

        let mut output = String::new();
        output.push_str("\n📊 Live Ledger Analytics\n");
        output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

        if snapshot.total_transactions == 0 {
            output.push_str("No recent transactions sampled.\n\n");
        }

        output.push_str(&format!(
            "Sampled Transactions: {}\n",
            format_number(snapshot.total_transactions)
        ));
        output.push_str(&format!("Total Volume: {:.2} SOL\n", snapshot.total_volume));
        output.push_str(&format!("Success Rate: {:.1}%\n", snapshot.success_rate));
        output.push_str(&format!(
            "Active Accounts: {}\n\n",
            format_number(snapshot.active_accounts)
        ));

        if !snapshot.program_distribution.is_empty() {
            output.push_str("Program Distribution:\n");
            output.push_str(&format!("  {:<20} {:>8}\n", "Category", "Count"));
            output.push_str(&format!("  {:-<20} {:->8}\n", "", ""));
            for entry in &snapshot.program_distribution {
                output.push_str(&format!("  {:<20} {:>8}\n", entry.name, entry.count));
            }
            output.push('\n');
        }

        output.push_str("Daily Volume (trailing 7 days):\n");
        output.push_str(&format!(
            "  {:<6} {:>12} {:>14}\n",
            "Day", "Transactions", "Volume (SOL)"
        ));
        output.push_str(&format!("  {:-<6} {:->12} {:->14}\n", "", "", ""));
        for day in &snapshot.daily_volume {
            output.push_str(&format!(
                "  {:<6} {:>12} {:>14.2}\n",
                day.name, day.transactions, day.value
            ));
        }
        output.push('\n');

        if !snapshot.recent_transactions.is_empty() {
            output.push_str("Recent Transactions:\n");
            for tx in &snapshot.recent_transactions {
                output.push_str(&format!(
                    "  {} {:<16} {} → {} {:.6} SOL [{:?}]\n",
                    format_timestamp(tx.observed_at),
                    tx.category,
                    tx.sender,
                    tx.receiver,
                    tx.amount,
                    tx.outcome
                ));
            }
        }

        Ok(output)
    }

    pub fn format_network_stats(
        reading: &NetworkStatsReading,
        format: OutputFormat,
    ) -> AppResult<String> {
        if format == OutputFormat::Json {
            return export_json(reading);
        }

        if !reading.success {
            return Ok("Network stats unavailable\n".to_string());
        }

        let mut output = format!(
            "TPS: {}\nSlot: {}\nBlock Time: {}ms\n",
            format_number(reading.tps as usize),
            reading.slot,
            reading.block_time_ms
        );
        if reading.stale {
            output.push_str("(stale - provider unreachable, showing last known values)\n");
        }
        Ok(output)
    }

    pub fn format_account(
        address: &str,
        summary: &AccountSummary,
        format: OutputFormat,
    ) -> AppResult<String> {
        if format == OutputFormat::Json {
            return export_json(summary);
        }

        let mut output = format!("Account: {}\n", address);
        output.push_str(&format!(
            "Balance: {}\n",
            format_lamports_as_sol(summary.lamports)
        ));
        output.push_str(&format!("Exists: {}\n", summary.exists));
        if let Some(owner) = &summary.owner {
            output.push_str(&format!("Owner: {}\n", owner));
        }
        output.push_str(&format!("Executable: {}\n", summary.executable));
        Ok(output)
    }
}

/// Format number with thousand separators for console output
///
/// # Examples
///
/// ```
/// # use ledger_analytics::analysis::report::format_number;
/// assert_eq!(format_number(1234), "1,234");
/// assert_eq!(format_number(1234567), "1,234,567");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown time".to_string())
}

/// Export data as JSON for programmatic use
pub fn export_json<T: Serialize>(data: &T) -> AppResult<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| AppError::InvalidData(format!("JSON export failed: {}", e)))
}
