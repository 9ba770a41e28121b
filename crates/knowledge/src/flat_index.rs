//! Exact (brute-force) vector index.
//!
//! Every query is compared against every stored row. Results are exact and
//! deterministic: equal distances are ordered by ascending id.

use crate::vector_index::{Neighbor, QueryBatch, VectorIndex};
use docqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Distance function used by a `FlatIndex`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Squared Euclidean distance
    #[default]
    L2,
    /// `1 - cosine similarity`
    Cosine,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::L2 => "l2",
            Metric::Cosine => "cosine",
        }
    }
}

impl std::str::FromStr for Metric {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l2" => Ok(Metric::L2),
            "cosine" => Ok(Metric::Cosine),
            other => Err(AppError::Config(format!(
                "Unknown metric '{}'. Supported: l2, cosine",
                other
            ))),
        }
    }
}

/// Serialized form of a flat index, as stored in the corpus artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatIndexState {
    #[serde(default)]
    pub metric: Metric,
    pub dimensions: usize,
    pub vectors: Vec<Vec<f32>>,
}

/// In-memory exact index. Read-only after construction, so it can be shared
/// across threads and searched concurrently.
#[derive(Debug, Clone)]
pub struct FlatIndex {
    metric: Metric,
    dimensions: usize,
    vectors: Vec<Vec<f32>>,
    /// Row norms, precomputed for cosine distance
    norms: Vec<f32>,
}

impl FlatIndex {
    /// Build an index from its serialized state, validating every row.
    pub fn from_state(state: FlatIndexState) -> AppResult<Self> {
        let FlatIndexState {
            metric,
            dimensions,
            vectors,
        } = state;

        if dimensions == 0 {
            return Err(AppError::Search(
                "Index dimensions must be positive".to_string(),
            ));
        }

        for (id, row) in vectors.iter().enumerate() {
            if row.len() != dimensions {
                return Err(AppError::Search(format!(
                    "Vector {} has {} dimensions, index expects {}",
                    id,
                    row.len(),
                    dimensions
                )));
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(AppError::Search(format!(
                    "Vector {} contains a non-finite value",
                    id
                )));
            }
        }

        let norms = vectors.iter().map(|row| norm(row)).collect();

        Ok(Self {
            metric,
            dimensions,
            vectors,
            norms,
        })
    }

    /// Empty index of the given width.
    pub fn empty(metric: Metric, dimensions: usize) -> AppResult<Self> {
        Self::from_state(FlatIndexState {
            metric,
            dimensions,
            vectors: Vec::new(),
        })
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Serializable snapshot of the index.
    pub fn to_state(&self) -> FlatIndexState {
        FlatIndexState {
            metric: self.metric,
            dimensions: self.dimensions,
            vectors: self.vectors.clone(),
        }
    }

    fn distance(&self, query: &[f32], query_norm: f32, id: usize) -> f32 {
        let row = &self.vectors[id];
        match self.metric {
            Metric::L2 => query
                .iter()
                .zip(row)
                .map(|(a, b)| (a - b) * (a - b))
                .sum(),
            Metric::Cosine => {
                let denom = query_norm * self.norms[id];
                if denom == 0.0 {
                    1.0
                } else {
                    1.0 - dot(query, row) / denom
                }
            }
        }
    }

    fn search_row(&self, query: &[f32], k: usize) -> Vec<Neighbor> {
        let query_norm = norm(query);

        let mut scored: Vec<Neighbor> = (0..self.vectors.len())
            .map(|id| Neighbor {
                id,
                distance: self.distance(query, query_norm, id),
            })
            .collect();

        scored.sort_by(|a, b| match a.distance.total_cmp(&b.distance) {
            Ordering::Equal => a.id.cmp(&b.id),
            other => other,
        });
        scored.truncate(k);
        scored
    }
}

impl VectorIndex for FlatIndex {
    fn total_count(&self) -> usize {
        self.vectors.len()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn metric_name(&self) -> &str {
        self.metric.as_str()
    }

    fn search(&self, queries: &QueryBatch, top_k: usize) -> AppResult<Vec<Vec<Neighbor>>> {
        if top_k == 0 {
            return Err(AppError::InvalidQuery(
                "top_k must be a positive integer".to_string(),
            ));
        }

        if self.vectors.is_empty() {
            return Err(AppError::EmptyIndex);
        }

        if let Some(width) = queries.dimensions()? {
            if width != self.dimensions {
                return Err(AppError::Search(format!(
                    "Query has {} dimensions, index expects {}",
                    width, self.dimensions
                )));
            }
        }

        let k = top_k.min(self.vectors.len());
        tracing::trace!(
            "Flat search: {} queries, k={} over {} vectors",
            queries.len(),
            k,
            self.vectors.len()
        );

        Ok(queries.rows().map(|q| self.search_row(q, k)).collect())
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn norm(v: &[f32]) -> f32 {
    dot(v, v).sqrt()
}
