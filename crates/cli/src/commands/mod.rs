//! Command handlers for the docqa CLI.

pub mod ask;
pub mod build;
pub mod stats;

pub use ask::AskCommand;
pub use build::BuildCommand;
pub use stats::StatsCommand;

use docqa_core::{config::AppConfig, AppError, AppResult};
use docqa_knowledge::Corpus;

/// Load the configured corpus off the async runtime.
pub(crate) async fn load_corpus(config: &AppConfig) -> AppResult<Corpus> {
    let path = config.corpus_path();

    tokio::task::spawn_blocking(move || docqa_knowledge::load_corpus(&path))
        .await
        .map_err(|e| AppError::Other(format!("Corpus loading task failed: {}", e)))?
}
