//! Logs command handler.
//!
//! Prints the most recent interaction journal records.

use clap::Args;
use snowdesk_agent::open_journal;
use snowdesk_core::{config::AppConfig, AppError, AppResult};

/// Show recent interactions
#[derive(Args, Debug)]
pub struct LogsCommand {
    /// Number of records to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl LogsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing logs command");

        let journal = open_journal(config.journal.backend, &config.journal.path)?;
        let records = journal.recent(self.limit)?;

        if self.json {
            let json = serde_json::to_string_pretty(&records)
                .map_err(|e| AppError::Serialization(format!("Failed to serialize records: {}", e)))?;
            println!("{}", json);
            return Ok(());
        }

        if records.is_empty() {
            println!("No interactions recorded in {:?}", config.journal.path);
            return Ok(());
        }

        for record in &records {
            println!("{}  [{}]", record.timestamp, record.tools_used.join(", "));
            println!("  Q: {}", record.prompt);
            for line in record.response.lines() {
                println!("  | {}", line);
            }
            println!();
        }

        Ok(())
    }
}
