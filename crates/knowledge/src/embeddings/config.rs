//! Encoder reference stored inside a corpus artifact.

use docqa_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Identifies the encoder a corpus was built with.
///
/// The artifact carries this reference instead of the model itself; queries
/// must be encoded by the same provider/model or distances are meaningless.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Provider name: "trigram" or "ollama"
    pub provider: String,

    /// Model identifier (provider-specific)
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// Whether to normalize embeddings to unit length
    #[serde(default = "default_normalize")]
    pub normalize: bool,

    /// Maximum batch size used when building a corpus
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Provider-specific configuration (JSON object)
    #[serde(default)]
    pub provider_config: serde_json::Value,
}

fn default_normalize() -> bool {
    true
}

fn default_batch_size() -> usize {
    100
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "trigram".to_string(),
            model: "trigram-v1".to_string(),
            dimensions: 384,
            normalize: true,
            batch_size: 100,
            provider_config: serde_json::json!({}),
        }
    }
}

impl EmbeddingConfig {
    /// Read a string option from `provider_config`.
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.provider_config.get(key).and_then(|v| v.as_str())
    }

    /// Check the reference is usable before any provider is created.
    pub fn validate(&self) -> AppResult<()> {
        if self.provider.trim().is_empty() {
            return Err(AppError::Config("Encoder provider is empty".to_string()));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("Encoder model is empty".to_string()));
        }

        if self.dimensions == 0 {
            return Err(AppError::Config(
                "Encoder dimensions must be positive".to_string(),
            ));
        }

        if self.batch_size == 0 {
            return Err(AppError::Config(
                "Encoder batch size must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmbeddingConfig::default();
        assert_eq!(config.provider, "trigram");
        assert_eq!(config.model, "trigram-v1");
        assert_eq!(config.dimensions, 384);
        assert!(config.normalize);
        assert_eq!(config.batch_size, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: EmbeddingConfig = serde_json::from_str(
            r#"{"provider":"ollama","model":"nomic-embed-text","dimensions":768}"#,
        )
        .unwrap();

        assert!(config.normalize);
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.option_str("base_url"), None);
    }

    #[test]
    fn test_option_str() {
        let config = EmbeddingConfig {
            provider_config: serde_json::json!({"base_url": "http://gpu-box:11434"}),
            ..Default::default()
        };
        assert_eq!(config.option_str("base_url"), Some("http://gpu-box:11434"));
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let config = EmbeddingConfig {
            dimensions: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
