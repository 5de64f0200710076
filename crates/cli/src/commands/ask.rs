//! Ask command handler.
//!
//! Answers a single question through the same agent the HTTP API uses.

use crate::state::AppState;
use clap::Args;
use snowdesk_core::{config::AppConfig, AppError, AppResult};

/// Ask a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Output as JSON (answer and tools used)
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let state = AppState::from_config(config).await?;
        let result = state.agent.answer(&self.question).await;

        if self.json {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| AppError::Serialization(format!("Failed to serialize answer: {}", e)))?;
            println!("{}", json);
        } else {
            println!("{}", result.answer);
        }

        Ok(())
    }
}
