//! Passage store: a loaded index-artifact pair.
//!
//! A store is built offline as two files that must correspond 1:1 by
//! position:
//! - `heritage_<language>.vec` — raw little-endian f32 embeddings, row-major
//! - `heritage_<language>.json` — the passage texts and metadata, plus the
//!   embedding model and dimensionality the vectors were computed with
//!
//! Loading validates the pairing and fails the pair as a unit; a failed load
//! must degrade the owning language to an apology path, never crash the
//! process.

use crate::flat::FlatIndex;
use crate::types::{IndexStats, Passage, PassageFile, SearchHit};
use rihla_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Paths of the artifact pair for a language tag.
pub fn artifact_paths(data_dir: &Path, language: &str) -> (PathBuf, PathBuf) {
    (
        data_dir.join(format!("heritage_{}.vec", language)),
        data_dir.join(format!("heritage_{}.json", language)),
    )
}

/// An immutable, fully in-memory passage collection with its vector index.
#[derive(Debug)]
pub struct PassageStore {
    passages: Vec<Passage>,
    index: FlatIndex,
    model: String,
}

impl PassageStore {
    /// Load a store from its artifact pair.
    ///
    /// Fails if either file is unreadable, the vector file does not decode
    /// into exactly one row per passage, or the store would be empty.
    pub fn load(vectors_path: &Path, passages_path: &Path) -> AppResult<Self> {
        let passages_raw = std::fs::read_to_string(passages_path).map_err(|e| {
            AppError::Index(format!(
                "Failed to read passages file {:?}: {}",
                passages_path, e
            ))
        })?;

        let passage_file: PassageFile = serde_json::from_str(&passages_raw).map_err(|e| {
            AppError::Index(format!(
                "Failed to parse passages file {:?}: {}",
                passages_path, e
            ))
        })?;

        let vector_bytes = std::fs::read(vectors_path).map_err(|e| {
            AppError::Index(format!(
                "Failed to read vector file {:?}: {}",
                vectors_path, e
            ))
        })?;

        let index = FlatIndex::from_bytes(&vector_bytes, passage_file.dimensions)?;

        if index.len() != passage_file.passages.len() {
            return Err(AppError::Index(format!(
                "Artifact mismatch: {} vectors but {} passages ({:?})",
                index.len(),
                passage_file.passages.len(),
                passages_path
            )));
        }

        if passage_file.passages.is_empty() {
            return Err(AppError::Index(format!(
                "Passages file {:?} holds no passages",
                passages_path
            )));
        }

        tracing::info!(
            "Loaded {} passages (model '{}', {} dims) from {:?}",
            passage_file.passages.len(),
            passage_file.model,
            passage_file.dimensions,
            passages_path
        );

        Ok(Self {
            passages: passage_file.passages,
            index,
            model: passage_file.model,
        })
    }

    /// Build a store directly from parts. The vector count must match the
    /// passage count.
    pub fn from_parts(
        passages: Vec<Passage>,
        index: FlatIndex,
        model: impl Into<String>,
    ) -> AppResult<Self> {
        if index.len() != passages.len() {
            return Err(AppError::Index(format!(
                "{} vectors but {} passages",
                index.len(),
                passages.len()
            )));
        }

        Ok(Self {
            passages,
            index,
            model: model.into(),
        })
    }

    /// Number of passages.
    pub fn len(&self) -> usize {
        self.passages.len()
    }

    /// Whether the store holds no passages.
    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Embedding model the store was built with.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Embedding vector dimensions.
    pub fn dimensions(&self) -> usize {
        self.index.dimensions()
    }

    /// Find the `k` passages nearest to the query vector, closest first.
    pub fn search(&self, query: &[f32], k: usize) -> AppResult<Vec<(&Passage, f32)>> {
        let hits = self.index.search(query, k)?;

        Ok(hits
            .into_iter()
            .map(|SearchHit { position, distance }| (&self.passages[position], distance))
            .collect())
    }

    /// Store statistics.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            passages_count: self.len(),
            dimensions: self.dimensions(),
            model: self.model.clone(),
        }
    }
}
