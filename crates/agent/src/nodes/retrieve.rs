//! Retrieval step: nearest-neighbor recall, no filtering.

use rihla_core::AppResult;
use rihla_index::{EmbeddingProvider, PassageStore};

/// Number of candidate passages fetched per retrieval pass.
pub const TOP_K: usize = 10;

/// Embed the question and fetch the nearest passages, closest first.
///
/// The question must be encoded in the same embedding space the store was
/// built with; the caller wires one encoder to all stores for that reason.
pub async fn retrieve(
    encoder: &dyn EmbeddingProvider,
    store: &PassageStore,
    question: &str,
) -> AppResult<Vec<String>> {
    let query = encoder.embed(question).await?;

    let results = store.search(&query, TOP_K)?;

    tracing::debug!(
        "Retrieved {} candidates for question: {}",
        results.len(),
        question
    );

    Ok(results
        .into_iter()
        .map(|(passage, _distance)| passage.text.clone())
        .collect())
}
