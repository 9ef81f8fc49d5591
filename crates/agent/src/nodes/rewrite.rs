//! Rewrite step: reformulate the question for another retrieval pass.

use crate::state::QueryState;
use rihla_core::AppResult;
use rihla_llm::{LlmClient, LlmRequest};
use rihla_prompt::rewrite_prompt;

/// Outcome of a rewrite attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewritten {
    /// State was reset with a new question; run another retrieval pass
    Retry,
    /// The current question was already tried; stop without calling the LLM
    Exhausted,
}

/// Rewrite the current question into a concise search query.
///
/// If the current question is already in the attempt history — a previous
/// rewrite came back with a string we had tried before — no LLM call is
/// made and the caller must terminate with the could-not-find message.
/// Otherwise the question is recorded, the model produces a reformulation,
/// and the state is reset for the next retrieval pass.
pub async fn rewrite(
    llm: &dyn LlmClient,
    model: &str,
    state: &mut QueryState,
) -> AppResult<Rewritten> {
    if state.attempted(&state.question) {
        tracing::info!("Rewrite produced an already-tried question, giving up");
        return Ok(Rewritten::Exhausted);
    }

    state.record_attempt();

    let prompt = rewrite_prompt(state.language, &state.question)?;
    let request = LlmRequest::new(prompt, model).with_temperature(0.0);

    let response = llm.complete(&request).await?;
    let new_question = response.content.trim().to_string();

    if new_question.is_empty() {
        tracing::warn!("Rewrite returned an empty query, giving up");
        return Ok(Rewritten::Exhausted);
    }

    tracing::info!("Rewrote question to: {}", new_question);

    state.reset_for_retry(new_question);
    Ok(Rewritten::Retry)
}
