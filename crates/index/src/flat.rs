//! Flat in-memory vector index.
//!
//! Brute-force nearest-neighbor search by squared L2 distance. With a few
//! thousand passages per language a linear scan beats any approximate
//! structure on both simplicity and recall, and the index never changes
//! after load.

use crate::types::SearchHit;
use rihla_core::{AppError, AppResult};

/// A dense matrix of row vectors, searched exhaustively.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimensions: usize,
    /// Row-major, `len() * dimensions` values
    vectors: Vec<f32>,
}

impl FlatIndex {
    /// Create an empty index for vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> AppResult<Self> {
        if dimensions == 0 {
            return Err(AppError::Index(
                "Vector dimensionality must be non-zero".to_string(),
            ));
        }

        Ok(Self {
            dimensions,
            vectors: Vec::new(),
        })
    }

    /// Decode an index from raw little-endian f32 bytes.
    ///
    /// The byte length must be a whole number of `dimensions`-sized rows.
    pub fn from_bytes(bytes: &[u8], dimensions: usize) -> AppResult<Self> {
        let mut index = Self::new(dimensions)?;

        if bytes.len() % 4 != 0 {
            return Err(AppError::Index(
                "Invalid vector file: length is not a multiple of 4 bytes".to_string(),
            ));
        }

        let value_count = bytes.len() / 4;
        if value_count % dimensions != 0 {
            return Err(AppError::Index(format!(
                "Invalid vector file: {} values do not form whole rows of dimension {}",
                value_count, dimensions
            )));
        }

        index.vectors.reserve(value_count);
        for chunk in bytes.chunks_exact(4) {
            index
                .vectors
                .push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
        }

        Ok(index)
    }

    /// Encode the index as raw little-endian f32 bytes (the artifact format).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.vectors.len() * 4);
        for value in &self.vectors {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    /// Append a row vector.
    pub fn add(&mut self, vector: &[f32]) -> AppResult<()> {
        if vector.len() != self.dimensions {
            return Err(AppError::Index(format!(
                "Vector has {} dimensions, index expects {}",
                vector.len(),
                self.dimensions
            )));
        }

        self.vectors.extend_from_slice(vector);
        Ok(())
    }

    /// Number of row vectors.
    pub fn len(&self) -> usize {
        self.vectors.len() / self.dimensions
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector dimensionality.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Find the `k` nearest rows to the query, closest first.
    pub fn search(&self, query: &[f32], k: usize) -> AppResult<Vec<SearchHit>> {
        if query.len() != self.dimensions {
            return Err(AppError::Index(format!(
                "Query has {} dimensions, index expects {}",
                query.len(),
                self.dimensions
            )));
        }

        let mut hits: Vec<SearchHit> = self
            .vectors
            .chunks_exact(self.dimensions)
            .enumerate()
            .map(|(position, row)| SearchHit {
                position,
                distance: squared_l2(query, row),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);

        Ok(hits)
    }
}

/// Squared Euclidean distance; monotone in true L2, so fine for ranking.
fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
