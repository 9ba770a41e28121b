//! Question answering over a pre-indexed corpus.
//!
//! A corpus artifact bundles a vector index, the reference of the encoder it
//! was built with, fragment texts and their summaries. Questions are encoded,
//! matched against the index, and the nearest fragments and summaries are
//! assembled into a short answer.
//!
//! ```no_run
//! use docqa_core::AnswerMessages;
//! use std::path::Path;
//!
//! # async fn example() -> docqa_core::AppResult<()> {
//! let corpus = docqa_knowledge::load_corpus(Path::new("chatbot_data.json"))?;
//! let answers = docqa_knowledge::ask(
//!     "Apa itu fotosintesis?; Siapa penemu listrik?",
//!     &corpus,
//!     3,
//!     &AnswerMessages::default(),
//! )
//! .await?;
//!
//! for answer in answers {
//!     println!("{}: {}", answer.query, answer.body);
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod corpus;
pub mod embeddings;
pub mod flat_index;
pub mod query;
pub mod retrieval;
pub mod synthesis;
pub mod vector_index;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use corpus::{Corpus, CorpusArtifact, CorpusStats, CorpusStore, SUMMARY_UNAVAILABLE};
pub use flat_index::{FlatIndex, Metric};
pub use query::parse_query_batch;
pub use retrieval::{QueryRetrieval, Retrieval, Retriever};
pub use synthesis::{synthesize, Answer};
pub use vector_index::{Neighbor, QueryBatch, VectorIndex};

use docqa_core::{AnswerMessages, AppResult};
use std::path::Path;

/// Load and validate a corpus artifact. Fails with `AppError::CorpusLoad`.
pub fn load_corpus(path: &Path) -> AppResult<Corpus> {
    Corpus::load(path)
}

/// Answer a batch of questions, one `Answer` per non-blank question, in order.
pub async fn ask_batch<S: AsRef<str>>(
    queries: &[S],
    corpus: &Corpus,
    top_k: usize,
    messages: &AnswerMessages,
) -> AppResult<Vec<Answer>> {
    let results = Retriever::new(corpus)
        .with_top_k(top_k)
        .retrieve_batch(queries)
        .await?;

    Ok(synthesis::synthesize_all(&results, messages))
}

/// Answer semicolon-separated questions typed as one string.
pub async fn ask(
    input: &str,
    corpus: &Corpus,
    top_k: usize,
    messages: &AnswerMessages,
) -> AppResult<Vec<Answer>> {
    let queries = parse_query_batch(input);
    tracing::debug!("Parsed {} questions from input", queries.len());
    ask_batch(&queries, corpus, top_k, messages).await
}
