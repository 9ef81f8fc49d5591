//! Answering agent for the Rihla assistant.
//!
//! Coordinates the embedding encoder, the per-language passage stores, and
//! the LLM through a bounded retrieve → grade → decide → generate/rewrite
//! loop, exposed as a single `ask(question) -> answer` entry point.
//!
//! `ask` always returns a string. Collaborator outages, unsupported
//! languages, and exhausted retries all degrade to fixed localized
//! messages; nothing propagates as an error to the caller.

pub mod decision;
pub mod language;
pub mod nodes;
pub mod state;

#[cfg(test)]
mod tests;

pub use decision::{decide, Decision, MAX_ATTEMPTS};
pub use state::QueryState;

use rihla_core::{AppConfig, AppError, AppResult};
use rihla_index::{artifact_paths, EmbeddingConfig, EmbeddingProvider, PassageStore};
use rihla_llm::LlmClient;
use rihla_prompt::{
    index_unavailable_message, no_information_message, unsupported_language_message, Language,
};
use std::collections::HashMap;
use std::sync::Arc;

/// The answering agent.
///
/// Holds the read-only collaborators. Safe to share across concurrent
/// questions: per-question state lives in a [`QueryState`] owned by each
/// `ask` call.
pub struct RihlaAgent {
    llm: Arc<dyn LlmClient>,
    encoder: Arc<dyn EmbeddingProvider>,
    stores: HashMap<Language, Arc<PassageStore>>,
    model: String,
}

impl RihlaAgent {
    /// Build an agent from already-constructed collaborators.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        encoder: Arc<dyn EmbeddingProvider>,
        stores: HashMap<Language, Arc<PassageStore>>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            encoder,
            stores,
            model: model.into(),
        }
    }

    /// Build an agent from application configuration.
    ///
    /// Fails only on configuration errors (unknown provider). A language
    /// index that cannot be loaded is logged and skipped; questions in that
    /// language get a fixed apology instead of crashing the process.
    pub fn load(config: &AppConfig) -> AppResult<Self> {
        let endpoint = config.resolve_endpoint(&config.provider);
        let api_key = config.resolve_api_key(&config.provider);

        let llm =
            rihla_llm::create_client(&config.provider, endpoint.as_deref(), api_key.as_deref())
                .map_err(AppError::Config)?;

        let embedding_config = EmbeddingConfig {
            provider: config.embedding_provider.clone(),
            model: config.embedding_model.clone(),
            dimensions: config.embedding_dim,
            endpoint: config.resolve_endpoint(&config.embedding_provider),
        };
        let encoder = rihla_index::create_provider(&embedding_config)?;

        let mut stores = HashMap::new();
        for lang in Language::ALL {
            let (vectors_path, passages_path) = artifact_paths(&config.data_dir, lang.as_str());

            match PassageStore::load(&vectors_path, &passages_path) {
                Ok(store) => {
                    if store.model() != encoder.model_name() {
                        tracing::warn!(
                            "{} index was built with model '{}' but the encoder uses '{}'",
                            lang,
                            store.model(),
                            encoder.model_name()
                        );
                    }
                    stores.insert(lang, Arc::new(store));
                }
                Err(e) => {
                    tracing::warn!("Could not load {} index: {}", lang, e);
                }
            }
        }

        Ok(Self::new(llm, encoder, stores, config.model.clone()))
    }

    /// Answer a question.
    ///
    /// Always returns a string; internal failures become fixed localized
    /// messages. Terminates after at most [`MAX_ATTEMPTS`] retrieval rounds.
    pub async fn ask(&self, question: &str) -> String {
        let question = question.trim();

        let Some(lang) = language::detect(question) else {
            tracing::info!("Question language is unsupported");
            return unsupported_language_message().to_string();
        };

        tracing::info!("Detected language: {}", lang);

        let Some(store) = self.stores.get(&lang) else {
            tracing::warn!("No usable {} index, returning apology", lang);
            return index_unavailable_message(lang).to_string();
        };

        let mut state = QueryState::new(question, lang);

        loop {
            state.docs =
                match nodes::retrieve(self.encoder.as_ref(), store, &state.question).await {
                    Ok(docs) => docs,
                    Err(e) => {
                        tracing::warn!("Retrieval failed: {}", e);
                        return index_unavailable_message(lang).to_string();
                    }
                };

            state.docs = nodes::grade(
                self.llm.as_ref(),
                &self.model,
                lang,
                &state.question,
                &state.docs,
            )
            .await;

            match decide(&state.docs, &state.attempts, &state.question) {
                Decision::Generate => {
                    tracing::info!("Decision: generate ({} relevant passages)", state.docs.len());

                    state.answer = match nodes::generate(
                        self.llm.as_ref(),
                        &self.model,
                        lang,
                        &state.question,
                        &state.docs,
                    )
                    .await
                    {
                        Ok(answer) => answer,
                        Err(e) => {
                            tracing::warn!("Generation failed: {}", e);
                            no_information_message(lang).to_string()
                        }
                    };

                    return state.answer;
                }

                Decision::End => {
                    tracing::info!("Decision: end (attempt budget spent)");
                    state.answer = no_information_message(lang).to_string();
                    return state.answer;
                }

                Decision::Rewrite => {
                    tracing::info!("Decision: rewrite (no relevant passages)");

                    match nodes::rewrite(self.llm.as_ref(), &self.model, &mut state).await {
                        Ok(nodes::Rewritten::Retry) => {}
                        Ok(nodes::Rewritten::Exhausted) => {
                            state.answer = no_information_message(lang).to_string();
                            return state.answer;
                        }
                        Err(e) => {
                            tracing::warn!("Rewrite failed: {}", e);
                            state.answer = no_information_message(lang).to_string();
                            return state.answer;
                        }
                    }
                }
            }
        }
    }
}
