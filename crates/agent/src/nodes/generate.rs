//! Generation step: synthesize a grounded answer.

use rihla_core::AppResult;
use rihla_llm::{LlmClient, LlmRequest};
use rihla_prompt::{generation_prompt, Language};

/// Generate the final answer from the relevant passages.
///
/// Passages are concatenated double-newline separated, preserving their
/// order. The model is instructed to answer strictly from that context, in
/// the question's language, and to say it does not know otherwise. The raw
/// completion is returned verbatim.
pub async fn generate(
    llm: &dyn LlmClient,
    model: &str,
    language: Language,
    question: &str,
    docs: &[String],
) -> AppResult<String> {
    let context = docs.join("\n\n");
    let prompt = generation_prompt(language, question, &context)?;

    // Low temperature for factual answers
    let request = LlmRequest::new(prompt, model)
        .with_temperature(0.3)
        .with_max_tokens(1000);

    let response = llm.complete(&request).await?;

    tracing::info!("Generated answer in {}", language);

    Ok(response.content)
}
