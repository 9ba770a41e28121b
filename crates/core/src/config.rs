//! Configuration management for docqa.
//!
//! Configuration is layered, later sources winning:
//! - Built-in defaults
//! - Config file (`--config`, `DOCQA_CONFIG`, or `<workspace>/.docqa/config.yaml`)
//! - Environment variables
//! - Command-line flags
//!
//! The answer wording lives here as well so a deployment can translate it
//! without touching the retrieval code.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default corpus artifact file name, resolved against the workspace.
pub const DEFAULT_CORPUS_FILE: &str = "chatbot_data.json";

/// Default number of neighbors requested per query.
pub const DEFAULT_TOP_K: usize = 3;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .docqa/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Corpus artifact path; relative paths are resolved against `workspace`
    pub corpus: PathBuf,

    /// Neighbors requested per query
    pub top_k: usize,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Wording used when rendering answers
    pub answer: AnswerMessages,
}

/// Fixed texts used by the response synthesizer and the CLI renderer.
///
/// Defaults are in Indonesian.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerMessages {
    /// Body used when no fragment was found
    pub no_content: String,

    /// Appended after the fragments when no summary survived filtering
    pub no_summary: String,

    /// Label introducing the joined summaries
    pub summary_label: String,

    /// Label for the question line when rendering markdown
    pub question_label: String,

    /// Label for the answer line when rendering markdown
    pub answer_label: String,
}

impl Default for AnswerMessages {
    fn default() -> Self {
        Self {
            no_content: "Tidak ada konten relevan yang ditemukan.".to_string(),
            no_summary: "Tidak ada ringkasan yang relevan.".to_string(),
            summary_label: "Ringkasan".to_string(),
            question_label: "Pertanyaan".to_string(),
            answer_label: "Jawaban".to_string(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    workspace: Option<WorkspaceConfig>,
    corpus: Option<CorpusConfig>,
    logging: Option<LoggingConfig>,
    answer: Option<AnswerMessages>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CorpusConfig {
    path: Option<String>,
    top_k: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            corpus: PathBuf::from(DEFAULT_CORPUS_FILE),
            top_k: DEFAULT_TOP_K,
            log_level: None,
            verbose: false,
            no_color: false,
            answer: AnswerMessages::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the config file and environment variables.
    ///
    /// Environment variables:
    /// - `DOCQA_WORKSPACE`: Override workspace path
    /// - `DOCQA_CONFIG`: Path to config file
    /// - `DOCQA_CORPUS`: Corpus artifact path
    /// - `DOCQA_TOP_K`: Neighbors per query
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use docqa_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Corpus: {:?}", config.corpus_path());
    /// ```
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("DOCQA_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("DOCQA_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.docqa_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        // Environment variables override YAML config
        if let Ok(corpus) = std::env::var("DOCQA_CORPUS") {
            config.corpus = PathBuf::from(corpus);
        }

        if let Ok(top_k) = std::env::var("DOCQA_TOP_K") {
            config.top_k = top_k.trim().parse().map_err(|e| {
                AppError::Config(format!("DOCQA_TOP_K must be a positive integer: {}", e))
            })?;
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(path) = config_file.workspace.and_then(|ws| ws.path) {
            result.workspace = PathBuf::from(path);
        }

        if let Some(corpus) = config_file.corpus {
            if let Some(path) = corpus.path {
                result.corpus = PathBuf::from(path);
            }
            if let Some(top_k) = corpus.top_k {
                result.top_k = top_k;
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(answer) = config_file.answer {
            result.answer = answer;
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over the file and the environment.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        corpus: Option<PathBuf>,
        top_k: Option<usize>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(corpus) = corpus {
            self.corpus = corpus;
        }

        if let Some(top_k) = top_k {
            self.top_k = top_k;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .docqa directory.
    pub fn docqa_dir(&self) -> PathBuf {
        self.workspace.join(".docqa")
    }

    /// Corpus artifact path, resolved against the workspace when relative.
    pub fn corpus_path(&self) -> PathBuf {
        if self.corpus.is_absolute() {
            self.corpus.clone()
        } else {
            self.workspace.join(&self.corpus)
        }
    }

    /// Validate the final configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.top_k == 0 {
            return Err(AppError::Config(
                "top_k must be a positive integer".to_string(),
            ));
        }

        if !self.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                self.workspace
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.corpus, PathBuf::from("chatbot_data.json"));
        assert!(!config.verbose);
        assert!(!config.no_color);
        assert_eq!(config.answer.summary_label, "Ringkasan");
    }

    #[test]
    fn test_docqa_dir() {
        let config = AppConfig::default();
        assert!(config.docqa_dir().ends_with(".docqa"));
    }

    #[test]
    fn test_corpus_path_resolution() {
        let temp = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.workspace = temp.path().to_path_buf();

        assert_eq!(config.corpus_path(), temp.path().join("chatbot_data.json"));

        let absolute = temp.path().join("elsewhere").join("corpus.json");
        config.corpus = absolute.clone();
        assert_eq!(config.corpus_path(), absolute);
    }

    #[test]
    fn test_with_overrides() {
        let config = AppConfig::default();
        let overridden = config.with_overrides(
            None,
            None,
            Some(PathBuf::from("other.json")),
            Some(5),
            None,
            true,
            false,
        );

        assert_eq!(overridden.corpus, PathBuf::from("other.json"));
        assert_eq!(overridden.top_k, 5);
        assert!(overridden.verbose);
        assert_eq!(overridden.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_merge_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(
            &path,
            r#"
corpus:
  path: data/corpus.json
  topK: 4
logging:
  level: warn
  color: false
answer:
  noContent: Nothing relevant found.
  summaryLabel: Summary
"#,
        )
        .unwrap();

        let merged = AppConfig::default().merge_yaml(&path).unwrap();

        assert_eq!(merged.corpus, PathBuf::from("data/corpus.json"));
        assert_eq!(merged.top_k, 4);
        assert_eq!(merged.log_level, Some("warn".to_string()));
        assert!(merged.no_color);
        assert_eq!(merged.answer.no_content, "Nothing relevant found.");
        assert_eq!(merged.answer.summary_label, "Summary");
        // Unset fields keep their defaults
        assert_eq!(merged.answer.no_summary, "Tidak ada ringkasan yang relevan.");
    }

    #[test]
    fn test_merge_yaml_rejects_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "corpus: [unclosed").unwrap();

        let result = AppConfig::default().merge_yaml(&path);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut config = AppConfig::default();
        config.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_default() {
        let temp = TempDir::new().unwrap();
        let mut config = AppConfig::default();
        config.workspace = temp.path().to_path_buf();
        assert!(config.validate().is_ok());
    }
}
