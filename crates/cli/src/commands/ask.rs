//! Ask command handler.
//!
//! Answers one or more questions against the configured corpus.

use super::load_corpus;
use clap::Args;
use docqa_core::{config::AppConfig, AppError, AppResult};
use docqa_knowledge::{ask_batch, parse_query_batch, Answer};
use std::path::PathBuf;

/// Shown when the input holds no question at all.
const EMPTY_INPUT_WARNING: &str = "Masukkan setidaknya satu pertanyaan.";

/// Ask one or more questions, separated by ';'
#[derive(Args, Debug)]
pub struct AskCommand {
    /// Questions to ask, e.g. "Apa itu X?; Siapa Y?"
    pub questions: Option<String>,

    /// Read questions from file
    #[arg(short, long, conflicts_with = "questions")]
    pub file: Option<PathBuf>,

    /// Neighbors requested per question
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let input = self.read_input()?;
        let queries = parse_query_batch(&input);

        if queries.is_empty() {
            tracing::warn!("No question given");
            eprintln!("{}", EMPTY_INPUT_WARNING);
            return Ok(());
        }

        let top_k = self.top_k.unwrap_or(config.top_k);
        let corpus = load_corpus(config).await?;
        let answers = ask_batch(&queries, &corpus, top_k, &config.answer).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&answers)?);
        } else {
            println!("{}", render_markdown(&answers, config));
        }

        Ok(())
    }

    /// Question text from the positional argument or `--file`.
    fn read_input(&self) -> AppResult<String> {
        if let Some(ref path) = self.file {
            return std::fs::read_to_string(path).map_err(|e| {
                AppError::Config(format!("Failed to read questions file {:?}: {}", path, e))
            });
        }

        Ok(self.questions.clone().unwrap_or_default())
    }
}

fn render_markdown(answers: &[Answer], config: &AppConfig) -> String {
    answers
        .iter()
        .map(|a| a.to_markdown(&config.answer))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown_separates_answers() {
        let config = AppConfig::default();
        let answers = vec![
            Answer {
                query: "Apa itu X?".to_string(),
                body: "X.".to_string(),
            },
            Answer {
                query: "Siapa Y?".to_string(),
                body: "Y.".to_string(),
            },
        ];

        let rendered = render_markdown(&answers, &config);
        assert_eq!(
            rendered,
            "**Pertanyaan:** Apa itu X?\n\n**Jawaban:** X.\n\n---\n\n**Pertanyaan:** Siapa Y?\n\n**Jawaban:** Y."
        );
    }

    #[test]
    fn test_read_input_from_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("questions.txt");
        std::fs::write(&path, "Apa itu X?;Siapa Y?").unwrap();

        let cmd = AskCommand {
            questions: None,
            file: Some(path),
            top_k: None,
            json: false,
        };

        assert_eq!(cmd.read_input().unwrap(), "Apa itu X?;Siapa Y?");
    }

    #[test]
    fn test_missing_input_is_empty() {
        let cmd = AskCommand {
            questions: None,
            file: None,
            top_k: None,
            json: true,
        };

        assert!(parse_query_batch(&cmd.read_input().unwrap()).is_empty());
    }
}
