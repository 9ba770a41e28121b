//! The loaded corpus: vector index, encoder and fragment store as one unit.
//!
//! A `Corpus` only exists once every consistency check has passed, and it
//! offers no way to mutate its parts afterwards.

pub mod artifact;
pub mod store;

pub use artifact::CorpusArtifact;
pub use store::{CorpusStore, SUMMARY_UNAVAILABLE};

use crate::embeddings::{create_provider, EmbeddingProvider};
use crate::flat_index::FlatIndex;
use crate::vector_index::VectorIndex;
use docqa_core::{AppError, AppResult};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Read-only bundle searched by the retrieval engine.
#[derive(Debug)]
pub struct Corpus {
    index: Box<dyn VectorIndex>,
    encoder: Arc<dyn EmbeddingProvider>,
    store: CorpusStore,
}

/// Summary of a loaded corpus.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStats {
    pub fragments: usize,
    pub summaries: usize,
    pub usable_summaries: usize,
    pub indexed_vectors: usize,
    pub dimensions: usize,
    pub metric: String,
    pub encoder_provider: String,
    pub encoder_model: String,
}

impl Corpus {
    /// Assemble a corpus from already-built parts.
    ///
    /// Fails with `AppError::CorpusLoad` when the index addresses more rows
    /// than there are fragments, when encoder and index widths differ, or when
    /// a fragment is blank.
    pub fn new(
        index: Box<dyn VectorIndex>,
        encoder: Arc<dyn EmbeddingProvider>,
        store: CorpusStore,
    ) -> AppResult<Self> {
        if index.total_count() > store.fragment_count() {
            return Err(AppError::CorpusLoad(format!(
                "index holds {} vectors but only {} fragments exist",
                index.total_count(),
                store.fragment_count()
            )));
        }

        if encoder.dimensions() != index.dimensions() {
            return Err(AppError::CorpusLoad(format!(
                "encoder '{}' produces {} dimensions, index expects {}",
                encoder.model_name(),
                encoder.dimensions(),
                index.dimensions()
            )));
        }

        if let Some(position) = store
            .fragments()
            .iter()
            .position(|f| f.trim().is_empty())
        {
            return Err(AppError::CorpusLoad(format!(
                "fragment {} is empty",
                position
            )));
        }

        Ok(Self {
            index,
            encoder,
            store,
        })
    }

    /// Build a corpus from a decoded artifact.
    pub fn from_artifact(artifact: CorpusArtifact) -> AppResult<Self> {
        let CorpusArtifact {
            index,
            encoder,
            fragments,
            summaries,
        } = artifact;

        let index = FlatIndex::from_state(index).map_err(load_error("invalid index state"))?;
        let encoder = create_provider(&encoder).map_err(load_error("invalid encoder reference"))?;

        Self::new(
            Box::new(index),
            encoder,
            CorpusStore::new(fragments, summaries),
        )
    }

    /// Decode and validate a corpus from artifact bytes.
    pub fn from_slice(bytes: &[u8]) -> AppResult<Self> {
        let artifact = CorpusArtifact::from_slice(bytes).map_err(load_error("malformed artifact"))?;
        Self::from_artifact(artifact)
    }

    /// Load and validate a corpus artifact from disk.
    pub fn load(path: &Path) -> AppResult<Self> {
        tracing::info!("Loading corpus from {:?}", path);

        let artifact = CorpusArtifact::read(path)
            .map_err(|e| AppError::CorpusLoad(format!("cannot read {:?}: {}", path, e)))?;
        let corpus = Self::from_artifact(artifact)?;

        tracing::info!(
            "Corpus loaded: {} fragments, {} vectors, encoder {}/{}",
            corpus.store.fragment_count(),
            corpus.index.total_count(),
            corpus.encoder.provider_name(),
            corpus.encoder.model_name()
        );

        Ok(corpus)
    }

    pub fn index(&self) -> &dyn VectorIndex {
        self.index.as_ref()
    }

    pub fn encoder(&self) -> &dyn EmbeddingProvider {
        self.encoder.as_ref()
    }

    pub fn store(&self) -> &CorpusStore {
        &self.store
    }

    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            fragments: self.store.fragment_count(),
            summaries: self.store.summary_count(),
            usable_summaries: self.store.usable_summary_count(),
            indexed_vectors: self.index.total_count(),
            dimensions: self.index.dimensions(),
            metric: self.index.metric_name().to_string(),
            encoder_provider: self.encoder.provider_name().to_string(),
            encoder_model: self.encoder.model_name().to_string(),
        }
    }
}

fn load_error(context: &'static str) -> impl Fn(AppError) -> AppError {
    move |e| AppError::CorpusLoad(format!("{}: {}", context, e))
}
