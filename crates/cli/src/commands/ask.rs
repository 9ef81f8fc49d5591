//! Ask command handler.
//!
//! Answers a single question and prints the result.

use clap::Args;
use rihla_agent::RihlaAgent;
use rihla_core::{config::AppConfig, AppResult};

/// Ask a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Question: {}", self.question);

        let agent = RihlaAgent::load(config)?;

        let answer = agent.ask(&self.question).await;

        if self.json {
            let output = serde_json::json!({
                "question": self.question,
                "answer": answer,
                "provider": config.provider,
                "model": config.model,
            });

            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| rihla_core::AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", answer);
        }

        Ok(())
    }
}
