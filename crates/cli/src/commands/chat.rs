//! Chat command handler.
//!
//! Line-oriented interactive session on top of the answering agent. The
//! agent is loaded once; every line of input is an independent question
//! (no conversational memory).

use clap::Args;
use rihla_agent::RihlaAgent;
use rihla_core::{config::AppConfig, AppResult};
use std::io::{BufRead, Write};

/// Interactive chat session
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Prompt string shown before each question
    #[arg(long, default_value = "you> ")]
    pub prompt: String,
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Starting chat session");

        let agent = RihlaAgent::load(config)?;

        println!("Rihla — ask about MENA destinations, heritage sites, food, and travel.");
        println!("Type 'exit' or 'quit' to leave.");
        println!();

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        loop {
            print!("{}", self.prompt);
            stdout.flush()?;

            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF
                break;
            }

            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
                break;
            }

            let answer = agent.ask(question).await;
            println!("{}", answer);
            println!();
        }

        tracing::info!("Chat session ended");
        Ok(())
    }
}
