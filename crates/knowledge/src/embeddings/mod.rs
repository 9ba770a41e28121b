//! Embedding encoder.
//!
//! The retrieval engine depends only on the `EmbeddingProvider` contract;
//! which model sits behind it is decided by the encoder reference stored in
//! the corpus artifact.

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider};
