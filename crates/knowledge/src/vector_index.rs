//! Vector index abstraction.
//!
//! Defines a provider-agnostic nearest-neighbor search contract. Ids returned
//! by an index are row positions and map one-to-one onto fragment positions.

use docqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// One search hit: row id and distance (lower is more similar).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: usize,
    pub distance: f32,
}

/// Query vectors shaped as a `[batch, dimension]` matrix.
///
/// A single vector converts into a batch of one, so callers pass one query or
/// many through the same `search` call.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBatch {
    rows: Vec<Vec<f32>>,
}

impl QueryBatch {
    /// Batch of exactly one query vector.
    pub fn single(vector: Vec<f32>) -> Self {
        Self { rows: vec![vector] }
    }

    /// Number of query rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width shared by every row, `None` for an empty batch.
    ///
    /// Fails when rows have different lengths.
    pub fn dimensions(&self) -> AppResult<Option<usize>> {
        let Some(first) = self.rows.first() else {
            return Ok(None);
        };

        let width = first.len();
        if let Some((row, bad)) = self
            .rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != width)
        {
            return Err(AppError::Search(format!(
                "Ragged query batch: row 0 has {} dimensions, row {} has {}",
                width,
                row,
                bad.len()
            )));
        }

        Ok(Some(width))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

impl From<Vec<f32>> for QueryBatch {
    fn from(vector: Vec<f32>) -> Self {
        Self::single(vector)
    }
}

impl From<Vec<Vec<f32>>> for QueryBatch {
    fn from(rows: Vec<Vec<f32>>) -> Self {
        Self { rows }
    }
}

/// Trait for vector index backends.
///
/// Implementations must:
/// - fail with `AppError::EmptyIndex` when searching an index with no vectors
/// - return at most `min(top_k, total_count())` distinct ids per query row,
///   ordered by ascending distance
/// - return exactly one result list per query row, in row order
pub trait VectorIndex: Send + Sync + std::fmt::Debug {
    /// Number of indexed vectors. Valid ids are `0..total_count()`.
    fn total_count(&self) -> usize;

    /// Width of every indexed vector.
    fn dimensions(&self) -> usize;

    /// Metric name, for diagnostics.
    fn metric_name(&self) -> &str;

    /// Search for the `top_k` nearest neighbors of each query row.
    fn search(&self, queries: &QueryBatch, top_k: usize) -> AppResult<Vec<Vec<Neighbor>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_vector_becomes_batch_of_one() {
        let batch = QueryBatch::from(vec![1.0, 2.0, 3.0]);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.dimensions().unwrap(), Some(3));
    }

    #[test]
    fn test_matrix_batch() {
        let batch = QueryBatch::from(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.dimensions().unwrap(), Some(2));
        assert_eq!(batch.rows().nth(1).unwrap(), &[0.0, 1.0]);
    }

    #[test]
    fn test_empty_batch_has_no_dimensions() {
        let batch = QueryBatch::from(Vec::<Vec<f32>>::new());
        assert!(batch.is_empty());
        assert_eq!(batch.dimensions().unwrap(), None);
    }

    #[test]
    fn test_ragged_batch_is_rejected() {
        let batch = QueryBatch::from(vec![vec![1.0, 0.0], vec![1.0]]);
        let err = batch.dimensions().unwrap_err();
        assert!(matches!(err, AppError::Search(_)));
        assert!(err.to_string().contains("row 1"));
    }
}
