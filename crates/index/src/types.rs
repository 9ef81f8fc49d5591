//! Retrieval system type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An immutable unit of retrievable text.
///
/// The embedding is held by the vector index, row-for-row, not by the
/// passage itself; the nth index row belongs to the nth passage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passage {
    /// Text content
    pub text: String,

    /// Descriptive tags (e.g., country, site). Optional, unordered.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
}

/// On-disk passages artifact, the JSON half of an index pair.
///
/// The binary half holds the embeddings; both must correspond 1:1 by
/// position, which is validated at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassageFile {
    /// Embedding model the vectors were computed with
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// When the artifact pair was built
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub built_at: Option<DateTime<Utc>>,

    /// Passages, in index-row order
    pub passages: Vec<Passage>,
}

/// One nearest-neighbor search result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Row position in the index (and the passages artifact)
    pub position: usize,

    /// Squared L2 distance to the query vector (smaller is closer)
    pub distance: f32,
}

/// Statistics for a loaded passage store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of passages
    pub passages_count: usize,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// Embedding model the store was built with
    pub model: String,
}
