//! Stats command handler.
//!
//! Shows per-language index statistics.

use clap::Args;
use rihla_core::{config::AppConfig, AppResult};
use rihla_index::{artifact_paths, PassageStore};
use rihla_prompt::Language;

/// Show index statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let mut entries = Vec::new();

        for lang in Language::ALL {
            let (vectors_path, passages_path) = artifact_paths(&config.data_dir, lang.as_str());

            match PassageStore::load(&vectors_path, &passages_path) {
                Ok(store) => entries.push((lang, Some(store.stats()))),
                Err(e) => {
                    tracing::warn!("Could not load {} index: {}", lang, e);
                    entries.push((lang, None));
                }
            }
        }

        if self.json {
            let output: Vec<_> = entries
                .iter()
                .map(|(lang, stats)| match stats {
                    Some(stats) => serde_json::json!({
                        "language": lang.as_str(),
                        "available": true,
                        "passages": stats.passages_count,
                        "dimensions": stats.dimensions,
                        "model": stats.model,
                    }),
                    None => serde_json::json!({
                        "language": lang.as_str(),
                        "available": false,
                    }),
                })
                .collect();

            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| rihla_core::AppError::Serialization(e.to_string()))?;
            println!("{}", json);
        } else {
            for (lang, stats) in &entries {
                match stats {
                    Some(stats) => println!(
                        "{}: {} passages, {} dims, model '{}'",
                        lang, stats.passages_count, stats.dimensions, stats.model
                    ),
                    None => println!("{}: index not available", lang),
                }
            }
        }

        Ok(())
    }
}
