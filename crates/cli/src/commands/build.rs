//! Build command handler.
//!
//! Encodes a fragment file and writes a corpus artifact.

use clap::Args;
use docqa_core::{config::AppConfig, AppResult};
use docqa_knowledge::builder::{build_artifact, read_source_files};
use docqa_knowledge::embeddings::EmbeddingConfig;
use docqa_knowledge::Metric;
use std::path::PathBuf;
use std::time::Instant;

/// Build a corpus artifact from fragment and summary files
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Fragment file, one fragment per line (blank lines skipped)
    #[arg(long)]
    pub fragments: PathBuf,

    /// Summary file, line n summarizing fragment n (blank line = none)
    #[arg(long)]
    pub summaries: Option<PathBuf>,

    /// Where to write the artifact (default: the configured corpus path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Encoder provider (trigram, ollama)
    #[arg(long, default_value = "trigram")]
    pub provider: String,

    /// Encoder model (default depends on the provider)
    #[arg(long)]
    pub model: Option<String>,

    /// Embedding dimensions (default depends on the provider)
    #[arg(long)]
    pub dimensions: Option<usize>,

    /// Distance metric (l2, cosine)
    #[arg(long, default_value = "l2")]
    pub metric: String,

    /// Ollama base URL (default: OLLAMA_URL or http://localhost:11434)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl BuildCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing build command");
        tracing::debug!("Build options: {:?}", self);

        let start = Instant::now();
        let metric: Metric = self.metric.parse()?;
        let encoder = self.encoder_config();
        encoder.validate()?;

        let (fragments, summaries) =
            read_source_files(&self.fragments, self.summaries.as_deref())?;

        let artifact = build_artifact(fragments, summaries, encoder, metric).await?;

        let output = self.output.clone().unwrap_or_else(|| config.corpus_path());
        artifact.save(&output)?;

        let duration_secs = start.elapsed().as_secs_f64();

        if self.json {
            let output = serde_json::json!({
                "output": output,
                "fragments": artifact.fragments.len(),
                "dimensions": artifact.index.dimensions,
                "metric": metric.as_str(),
                "provider": artifact.encoder.provider,
                "model": artifact.encoder.model,
                "durationSecs": duration_secs,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!(
                "Built corpus with {} fragments ({} dimensions, {}) in {:.2}s: {}",
                artifact.fragments.len(),
                artifact.index.dimensions,
                metric.as_str(),
                duration_secs,
                output.display()
            );
        }

        Ok(())
    }

    /// Encoder reference from the flags, with per-provider defaults.
    fn encoder_config(&self) -> EmbeddingConfig {
        let (model, dimensions) = match self.provider.as_str() {
            "ollama" => ("nomic-embed-text", 768),
            _ => ("trigram-v1", 384),
        };

        let provider_config = match self.base_url {
            Some(ref url) => serde_json::json!({ "base_url": url }),
            None => serde_json::json!({}),
        };

        EmbeddingConfig {
            provider: self.provider.clone(),
            model: self.model.clone().unwrap_or_else(|| model.to_string()),
            dimensions: self.dimensions.unwrap_or(dimensions),
            provider_config,
            ..Default::default()
        }
    }
}
