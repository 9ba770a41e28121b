//! Build a corpus artifact from fragment and summary texts.

use crate::corpus::{CorpusArtifact, SUMMARY_UNAVAILABLE};
use crate::embeddings::{create_provider, EmbeddingConfig};
use crate::flat_index::{FlatIndexState, Metric};
use docqa_core::{AppError, AppResult};
use std::path::Path;
use std::time::Instant;

/// Encode `fragments` and bundle them with `summaries` into an artifact.
///
/// Blank fragments are rejected. Summaries are aligned by position: missing
/// or blank slots become [`SUMMARY_UNAVAILABLE`], extra ones are dropped.
pub async fn build_artifact(
    fragments: Vec<String>,
    summaries: Vec<String>,
    encoder: EmbeddingConfig,
    metric: Metric,
) -> AppResult<CorpusArtifact> {
    let start = Instant::now();

    if let Some(position) = fragments.iter().position(|f| f.trim().is_empty()) {
        return Err(AppError::Other(format!("fragment {} is empty", position)));
    }

    let provider = create_provider(&encoder)?;
    let total = fragments.len();
    let mut vectors = Vec::with_capacity(total);

    for (batch_no, batch) in fragments.chunks(encoder.batch_size).enumerate() {
        let embedded = provider.embed_batch(batch).await?;
        if embedded.len() != batch.len() {
            return Err(AppError::Encoding(format!(
                "encoder returned {} vectors for batch {} of {} fragments",
                embedded.len(),
                batch_no,
                batch.len()
            )));
        }
        vectors.extend(embedded);
        tracing::info!("Encoded {}/{} fragments", vectors.len(), total);
    }

    let summaries = align_summaries(summaries, total);

    tracing::info!(
        "Built corpus artifact: {} fragments, {} usable summaries in {:.2}s",
        total,
        summaries
            .iter()
            .filter(|s| s.as_str() != SUMMARY_UNAVAILABLE)
            .count(),
        start.elapsed().as_secs_f64()
    );

    Ok(CorpusArtifact {
        index: FlatIndexState {
            metric,
            dimensions: encoder.dimensions,
            vectors,
        },
        encoder,
        fragments,
        summaries,
    })
}

fn align_summaries(summaries: Vec<String>, len: usize) -> Vec<String> {
    let mut aligned: Vec<String> = summaries
        .into_iter()
        .take(len)
        .map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                SUMMARY_UNAVAILABLE.to_string()
            } else {
                trimmed.to_string()
            }
        })
        .collect();
    aligned.resize(len, SUMMARY_UNAVAILABLE.to_string());
    aligned
}

/// Read fragment and summary texts, paired by line number.
///
/// Line `n` of the summaries file summarizes line `n` of the fragments file.
/// Blank fragment lines are skipped together with their summary line; a
/// blank summary line marks a missing summary.
pub fn read_source_files(
    fragments_path: &Path,
    summaries_path: Option<&Path>,
) -> AppResult<(Vec<String>, Vec<String>)> {
    let fragment_lines = read_lines(fragments_path)?;
    let summary_lines = match summaries_path {
        Some(path) => read_lines(path)?,
        None => Vec::new(),
    };

    if summary_lines.len() > fragment_lines.len() {
        tracing::warn!(
            "Summaries file has {} lines for {} fragment lines; extra lines ignored",
            summary_lines.len(),
            fragment_lines.len()
        );
    }

    let mut fragments = Vec::new();
    let mut summaries = Vec::new();

    for (line_no, fragment) in fragment_lines.iter().enumerate() {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            continue;
        }
        fragments.push(fragment.to_string());
        summaries.push(summary_lines.get(line_no).cloned().unwrap_or_default());
    }

    Ok((fragments, summaries))
}

fn read_lines(path: &Path) -> AppResult<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AppError::Other(format!("Failed to read {:?}: {}", path, e)))?;

    Ok(content.lines().map(str::to_string).collect())
}
