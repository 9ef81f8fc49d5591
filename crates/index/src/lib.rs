//! Passage retrieval for the Rihla assistant.
//!
//! This crate wraps the two read-only collaborators of the answering
//! pipeline:
//! - the embedding encoder ([`embeddings`]), which turns text into
//!   fixed-length vectors, and
//! - the vector index ([`store`], [`flat`]), which serves nearest-neighbor
//!   search over passages embedded offline.
//!
//! A [`PassageStore`] is loaded once from a pair of on-disk artifacts and is
//! immutable afterwards, so it can be shared freely across concurrent
//! queries.

pub mod embeddings;
pub mod flat;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
pub use flat::FlatIndex;
pub use store::{artifact_paths, PassageStore};
pub use types::{IndexStats, Passage, PassageFile, SearchHit};
