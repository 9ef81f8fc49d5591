//! Deterministic trigram embedding provider.
//!
//! Hashes character trigrams into a fixed number of dimensions and
//! normalizes the result. Not semantically meaningful like a neural model,
//! but deterministic and content-dependent, which is what tests and offline
//! development need. Works on any script, including Arabic.

use crate::embeddings::provider::EmbeddingProvider;
use rihla_core::AppResult;

/// Content-hash embedding provider.
#[derive(Debug)]
pub struct TrigramProvider {
    dimensions: usize,
}

impl TrigramProvider {
    /// Create a new trigram provider with the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn encode(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];

        for word in text.to_lowercase().split_whitespace() {
            let chars: Vec<char> = word.chars().collect();

            // Whole word plus its character trigrams; short words still hash
            embedding[self.bucket(fnv1a(word.as_bytes()))] += 1.0;

            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                embedding[self.bucket(fnv1a(trigram.as_bytes()))] += 1.0;
            }
        }

        // Normalize to unit vector
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut embedding {
                *v /= norm;
            }
        }

        embedding
    }

    fn bucket(&self, hash: u64) -> usize {
        (hash as usize) % self.dimensions
    }
}

/// FNV-1a, 64-bit.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

#[async_trait::async_trait]
impl EmbeddingProvider for TrigramProvider {
    fn provider_name(&self) -> &str {
        "trigram"
    }

    fn model_name(&self) -> &str {
        "trigram-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.encode(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dimensions_and_names() {
        let provider = TrigramProvider::new(384);
        assert_eq!(provider.dimensions(), 384);
        assert_eq!(provider.provider_name(), "trigram");
        assert_eq!(provider.model_name(), "trigram-v1");
    }

    #[tokio::test]
    async fn test_embeddings_are_unit_vectors() {
        let provider = TrigramProvider::new(384);
        let embedding = provider.embed("ancient desert citadel").await.unwrap();

        assert_eq!(embedding.len(), 384);
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_deterministic() {
        let provider = TrigramProvider::new(384);

        let first = provider.embed("deterministic test").await.unwrap();
        let second = provider.embed("deterministic test").await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_different_texts_differ() {
        let provider = TrigramProvider::new(384);

        let petra = provider.embed("Petra rock city").await.unwrap();
        let souk = provider.embed("Marrakesh spice souk").await.unwrap();

        assert_ne!(petra, souk);
    }

    #[tokio::test]
    async fn test_arabic_text() {
        let provider = TrigramProvider::new(384);
        let embedding = provider.embed("البتراء مدينة أثرية في الأردن").await.unwrap();

        assert_eq!(embedding.len(), 384);
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let provider = TrigramProvider::new(384);
        let embedding = provider.embed("").await.unwrap();

        assert!(embedding.iter().all(|&x| x == 0.0));
    }
}
