//! Serialized corpus bundle.
//!
//! On disk an artifact is a JSON array with exactly four elements, in order:
//! `[index_state, encoder_reference, fragments, summaries]`. Arity and order
//! are enforced by deserializing through a tuple struct.

use crate::embeddings::EmbeddingConfig;
use crate::flat_index::FlatIndexState;
use docqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// The four logical fields of a corpus artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ArtifactFields", into = "ArtifactFields")]
pub struct CorpusArtifact {
    pub index: FlatIndexState,
    pub encoder: EmbeddingConfig,
    pub fragments: Vec<String>,
    pub summaries: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct ArtifactFields(FlatIndexState, EmbeddingConfig, Vec<String>, Vec<String>);

impl From<ArtifactFields> for CorpusArtifact {
    fn from(ArtifactFields(index, encoder, fragments, summaries): ArtifactFields) -> Self {
        Self {
            index,
            encoder,
            fragments,
            summaries,
        }
    }
}

impl From<CorpusArtifact> for ArtifactFields {
    fn from(artifact: CorpusArtifact) -> Self {
        ArtifactFields(
            artifact.index,
            artifact.encoder,
            artifact.fragments,
            artifact.summaries,
        )
    }
}

impl CorpusArtifact {
    /// Decode an artifact from bytes. Shape errors only; consistency is
    /// checked when the corpus is assembled.
    pub fn from_slice(bytes: &[u8]) -> AppResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Read an artifact from a file.
    pub fn read(path: &Path) -> AppResult<Self> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Write the artifact as JSON, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Other(format!("Failed to create directory {:?}: {}", parent, e))
            })?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;

        tracing::debug!("Wrote corpus artifact to {:?}", path);
        Ok(())
    }
}
