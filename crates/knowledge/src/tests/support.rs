//! Stub collaborators that pin what the encoder and index return.

use crate::corpus::{Corpus, CorpusStore};
use crate::embeddings::EmbeddingProvider;
use crate::vector_index::{Neighbor, QueryBatch, VectorIndex};
use docqa_core::{AppError, AppResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const DIMS: usize = 4;

/// Index that answers every query row with the same neighbor ids.
#[derive(Debug)]
pub struct FixedIndex {
    pub total: usize,
    pub ids: Vec<usize>,
}

impl VectorIndex for FixedIndex {
    fn total_count(&self) -> usize {
        self.total
    }

    fn dimensions(&self) -> usize {
        DIMS
    }

    fn metric_name(&self) -> &str {
        "fixed"
    }

    fn search(&self, queries: &QueryBatch, top_k: usize) -> AppResult<Vec<Vec<Neighbor>>> {
        if self.total == 0 {
            return Err(AppError::EmptyIndex);
        }

        let neighbors: Vec<Neighbor> = self
            .ids
            .iter()
            .take(top_k)
            .enumerate()
            .map(|(rank, &id)| Neighbor {
                id,
                distance: rank as f32,
            })
            .collect();

        Ok(queries.rows().map(|_| neighbors.clone()).collect())
    }
}

/// Encoder returning zero vectors and counting `embed_batch` calls.
#[derive(Debug, Default)]
pub struct CountingEncoder {
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl CountingEncoder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for CountingEncoder {
    fn provider_name(&self) -> &str {
        "counting"
    }

    fn model_name(&self) -> &str {
        "zeros"
    }

    fn dimensions(&self) -> usize {
        DIMS
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::Encoding("model unavailable".to_string()));
        }
        Ok(texts.iter().map(|_| vec![0.0; DIMS]).collect())
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Corpus over `FixedIndex`, plus a handle on the encoder for call counting.
pub fn fixed_corpus(
    fragments: &[&str],
    summaries: &[&str],
    total: usize,
    ids: &[usize],
) -> (Corpus, Arc<CountingEncoder>) {
    let encoder = Arc::new(CountingEncoder::default());
    let corpus = Corpus::new(
        Box::new(FixedIndex {
            total,
            ids: ids.to_vec(),
        }),
        encoder.clone(),
        CorpusStore::new(strings(fragments), strings(summaries)),
    )
    .unwrap();
    (corpus, encoder)
}
