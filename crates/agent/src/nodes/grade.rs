//! Grading step: binary relevance filter over retrieved candidates.

use rihla_llm::{LlmClient, LlmRequest};
use rihla_prompt::{grading_prompt, Language};

/// Keep the candidates the model judges relevant to the question.
///
/// Each candidate is graded independently, in order; order among kept
/// candidates is preserved. A response counts as relevant when its lowercased
/// text contains "yes" — lenient on purpose, to tolerate verbose model
/// output. A failed grading call drops that candidate and the batch
/// continues; this step never fails as a whole.
pub async fn grade(
    llm: &dyn LlmClient,
    model: &str,
    language: Language,
    question: &str,
    docs: &[String],
) -> Vec<String> {
    let mut relevant = Vec::new();

    for doc in docs {
        let prompt = match grading_prompt(language, question, doc) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!("Failed to build grading prompt: {}", e);
                continue;
            }
        };

        let request = LlmRequest::new(prompt, model).with_temperature(0.0);

        match llm.complete(&request).await {
            Ok(response) => {
                if response.content.trim().to_lowercase().contains("yes") {
                    tracing::debug!("Grader: relevant");
                    relevant.push(doc.clone());
                } else {
                    tracing::debug!("Grader: not relevant");
                }
            }
            Err(e) => {
                // Treated as not relevant; one bad call must not sink the batch
                tracing::warn!("Grading call failed, dropping candidate: {}", e);
            }
        }
    }

    tracing::info!("Graded {} candidates, kept {}", docs.len(), relevant.len());

    relevant
}
