//! Retrieval engine: encode, search, look up, filter.
//!
//! For each query the nearest neighbors are walked in ascending distance.
//! Ids without a fragment are skipped entirely; for the rest the fragment is
//! collected and, separately, its summary when one is usable. Both lists are
//! then cut to their own limits, so a summary need not line up with a kept
//! fragment.

use crate::corpus::Corpus;
use crate::query::{normalize_batch, validate_query};
use crate::vector_index::{Neighbor, QueryBatch};
use docqa_core::config::DEFAULT_TOP_K;
use docqa_core::{AppError, AppResult};
use serde::Serialize;

/// Fragments kept per query.
pub const MAX_FRAGMENTS: usize = 2;

/// Summaries kept per query.
pub const MAX_SUMMARIES: usize = 2;

/// Outcome of retrieving one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Retrieval {
    /// No neighbor mapped to a fragment.
    NoContent,
    /// Fragments found, but none of them had a usable summary.
    FragmentsOnly { fragments: Vec<String> },
    /// Fragments and at least one usable summary.
    WithSummaries {
        fragments: Vec<String>,
        summaries: Vec<String>,
    },
}

impl Retrieval {
    /// Selected fragments, empty for `NoContent`.
    pub fn fragments(&self) -> &[String] {
        match self {
            Retrieval::NoContent => &[],
            Retrieval::FragmentsOnly { fragments }
            | Retrieval::WithSummaries { fragments, .. } => fragments,
        }
    }

    /// Selected summaries, empty unless `WithSummaries`.
    pub fn summaries(&self) -> &[String] {
        match self {
            Retrieval::WithSummaries { summaries, .. } => summaries,
            _ => &[],
        }
    }
}

/// A query paired with its retrieval outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryRetrieval {
    pub query: String,
    pub retrieval: Retrieval,
}

/// Runs queries against one loaded corpus.
#[derive(Debug, Clone, Copy)]
pub struct Retriever<'a> {
    corpus: &'a Corpus,
    top_k: usize,
}

impl<'a> Retriever<'a> {
    /// Retriever with the default `top_k` of 3.
    pub fn new(corpus: &'a Corpus) -> Self {
        Self {
            corpus,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Retrieve one query. A blank query fails with `InvalidQuery`.
    pub async fn retrieve(&self, query: &str) -> AppResult<Retrieval> {
        let query = validate_query(query)?;
        let mut results = self.retrieve_batch(&[query]).await?;

        results
            .pop()
            .map(|r| r.retrieval)
            .ok_or_else(|| AppError::Search("search returned no result list".to_string()))
    }

    /// Retrieve a batch of queries with one encoder call and one index call.
    ///
    /// Blank entries are dropped; the output follows the order of the
    /// remaining queries. A batch with nothing left fails with `InvalidQuery`.
    pub async fn retrieve_batch<S: AsRef<str>>(
        &self,
        queries: &[S],
    ) -> AppResult<Vec<QueryRetrieval>> {
        if self.top_k == 0 {
            return Err(AppError::InvalidQuery(
                "top_k must be a positive integer".to_string(),
            ));
        }

        let queries = normalize_batch(queries)?;

        let index = self.corpus.index();
        if index.total_count() == 0 {
            return Err(AppError::EmptyIndex);
        }

        tracing::info!(
            "Retrieving {} queries (top_k={})",
            queries.len(),
            self.top_k
        );

        let vectors = self.encode(&queries).await?;
        let neighbor_lists = index
            .search(&QueryBatch::from(vectors), self.top_k)
            .map_err(|e| with_batch_context(e, &queries))?;

        if neighbor_lists.len() != queries.len() {
            return Err(AppError::Search(format!(
                "index returned {} result lists for {} queries",
                neighbor_lists.len(),
                queries.len()
            )));
        }

        Ok(queries
            .into_iter()
            .zip(neighbor_lists)
            .map(|(query, neighbors)| {
                tracing::debug!(
                    "Query {:?}: neighbor ids {:?}",
                    query,
                    neighbors.iter().map(|n| n.id).collect::<Vec<_>>()
                );
                let retrieval = self.select(&neighbors);
                QueryRetrieval { query, retrieval }
            })
            .collect())
    }

    async fn encode(&self, queries: &[String]) -> AppResult<Vec<Vec<f32>>> {
        let encoder = self.corpus.encoder();
        let vectors = encoder
            .embed_batch(queries)
            .await
            .map_err(|e| with_batch_context(e, queries))?;

        if vectors.len() != queries.len() {
            return Err(AppError::Encoding(format!(
                "encoder '{}' returned {} vectors for {} queries",
                encoder.model_name(),
                vectors.len(),
                queries.len()
            )));
        }

        Ok(vectors)
    }

    /// Walk neighbors in distance order and pick fragments and summaries.
    fn select(&self, neighbors: &[Neighbor]) -> Retrieval {
        let store = self.corpus.store();
        let mut fragments = Vec::new();
        let mut summaries = Vec::new();

        for neighbor in neighbors {
            let Some(fragment) = store.fragment_at(neighbor.id) else {
                tracing::trace!("Skipping id {} with no fragment", neighbor.id);
                continue;
            };
            fragments.push(fragment.to_string());

            if let Some(summary) = store.summary_at(neighbor.id) {
                summaries.push(summary.to_string());
            }
        }

        fragments.truncate(MAX_FRAGMENTS);
        summaries.truncate(MAX_SUMMARIES);

        match (fragments.is_empty(), summaries.is_empty()) {
            (true, _) => Retrieval::NoContent,
            (false, true) => Retrieval::FragmentsOnly { fragments },
            (false, false) => Retrieval::WithSummaries {
                fragments,
                summaries,
            },
        }
    }
}

/// Name the batch that triggered an encoder or index failure.
fn with_batch_context(err: AppError, queries: &[String]) -> AppError {
    let context = format!("batch of {} queries {:?}", queries.len(), queries);
    match err {
        AppError::Encoding(msg) => AppError::Encoding(format!("{}: {}", context, msg)),
        AppError::Search(msg) => AppError::Search(format!("{}: {}", context, msg)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_accessors() {
        let none = Retrieval::NoContent;
        assert!(none.fragments().is_empty());
        assert!(none.summaries().is_empty());

        let only = Retrieval::FragmentsOnly {
            fragments: vec!["f".to_string()],
        };
        assert_eq!(only.fragments(), ["f".to_string()]);
        assert!(only.summaries().is_empty());

        let both = Retrieval::WithSummaries {
            fragments: vec!["f".to_string()],
            summaries: vec!["s".to_string()],
        };
        assert_eq!(both.summaries(), ["s".to_string()]);
    }

    #[test]
    fn test_retrieval_serializes_with_kind_tag() {
        let json = serde_json::to_value(Retrieval::FragmentsOnly {
            fragments: vec!["f".to_string()],
        })
        .unwrap();
        assert_eq!(json["kind"], "fragments_only");

        let json = serde_json::to_value(Retrieval::NoContent).unwrap();
        assert_eq!(json["kind"], "no_content");
    }

    #[test]
    fn test_batch_context_wraps_collaborator_errors_only() {
        let queries = vec!["q1".to_string()];

        let wrapped = with_batch_context(AppError::Encoding("timeout".to_string()), &queries);
        assert!(wrapped.to_string().contains("q1"));
        assert!(wrapped.to_string().contains("timeout"));

        let untouched = with_batch_context(AppError::EmptyIndex, &queries);
        assert!(matches!(untouched, AppError::EmptyIndex));
    }
}
