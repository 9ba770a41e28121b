//! Stats command handler.

use super::load_corpus;
use clap::Args;
use docqa_core::{config::AppConfig, AppResult};

/// Show corpus statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let corpus = load_corpus(config).await?;
        let stats = corpus.stats();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!("Corpus: {}", config.corpus_path().display());
            println!("  Fragments:        {}", stats.fragments);
            println!(
                "  Summaries:        {} ({} usable)",
                stats.summaries, stats.usable_summaries
            );
            println!("  Indexed vectors:  {}", stats.indexed_vectors);
            println!("  Dimensions:       {}", stats.dimensions);
            println!("  Metric:           {}", stats.metric);
            println!(
                "  Encoder:          {}/{}",
                stats.encoder_provider, stats.encoder_model
            );
        }

        Ok(())
    }
}
