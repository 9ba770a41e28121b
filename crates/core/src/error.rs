//! Error types for docqa.
//!
//! A single error enum covers the retrieval taxonomy (corpus loading, empty
//! index, invalid queries, encoder and index failures) plus the ambient
//! configuration, I/O and serialization errors.

use thiserror::Error;

/// Unified error type for docqa.
///
/// All fallible functions return `Result<T, AppError>`. Data conditions such
/// as out-of-range neighbor ids or unavailable summaries are not errors and
/// never surface here.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Corpus artifact missing, corrupt, wrong shape or inconsistent.
    /// The session must not continue with a partially loaded corpus.
    #[error("Failed to load corpus: {0}")]
    CorpusLoad(String),

    /// The vector index holds no vectors at search time.
    #[error("Vector index is empty: no data loaded")]
    EmptyIndex,

    /// Blank query, blank batch or an unusable `top_k`.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Failure reported by the embedding encoder
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Failure reported by the vector index
    #[error("Search error: {0}")]
    Search(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
