//! Offline encoder built from hashed words and character trigrams.

use crate::embeddings::provider::{normalize_in_place, EmbeddingProvider};
use docqa_core::AppResult;
use std::collections::BTreeMap;

/// Function words dropped before hashing (English and Indonesian).
const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "an", "as", "are", "was", "were", "for", "to", "of", "in",
    "and", "or", "but", "with", "by", "from", "this", "that", "be", "have", "has", "had", "it",
    "its", "what", "yang", "dan", "di", "ke", "dari", "ini", "itu", "untuk", "dengan", "pada",
    "adalah", "apa", "atau",
];

const WORD_SEED: u64 = 31;
const TRIGRAM_SEED: u64 = 37;

/// Deterministic feature-hashing encoder.
///
/// Each non-stop word adds weight to one bucket for the whole word and one
/// bucket per character trigram (padded with spaces, so short words still
/// contribute). Not semantic, but stable across runs and machines, which is
/// what corpora built offline need.
#[derive(Debug)]
pub struct TrigramProvider {
    model: String,
    dimensions: usize,
    normalize: bool,
}

impl TrigramProvider {
    pub fn new(model: impl Into<String>, dimensions: usize, normalize: bool) -> Self {
        Self {
            model: model.into(),
            dimensions,
            normalize,
        }
    }

    fn encode(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];

        for (word, freq) in word_frequencies(text) {
            let weight = freq as f32;
            embedding[self.bucket(&word, WORD_SEED)] += weight;

            let padded: Vec<char> = format!(" {} ", word).chars().collect();
            for window in padded.windows(3) {
                let trigram: String = window.iter().collect();
                embedding[self.bucket(&trigram, TRIGRAM_SEED)] += weight.sqrt();
            }
        }

        if self.normalize {
            normalize_in_place(&mut embedding);
        }

        embedding
    }

    fn bucket(&self, feature: &str, seed: u64) -> usize {
        let hash = feature
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(seed).wrapping_add(b as u64));
        (hash % self.dimensions as u64) as usize
    }
}

/// Lowercased alphanumeric words minus stop words, counted.
///
/// A `BTreeMap` keeps accumulation order fixed, so float sums are bit-identical
/// between runs.
fn word_frequencies(text: &str) -> BTreeMap<String, u32> {
    let lower = text.to_lowercase();
    let mut freq = BTreeMap::new();

    for word in lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(w))
    {
        *freq.entry(word.to_string()).or_insert(0) += 1;
    }

    freq
}

#[async_trait::async_trait]
impl EmbeddingProvider for TrigramProvider {
    fn provider_name(&self) -> &str {
        "trigram"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.encode(text)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> TrigramProvider {
        TrigramProvider::new("trigram-v1", 384, true)
    }

    fn cosine(a: &[f32], b: &[f32]) -> f32 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    #[tokio::test]
    async fn test_trigram_provider_embed_single() {
        let embedding = provider().embed("hello world").await.unwrap();

        assert_eq!(embedding.len(), 384);
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_batch_matches_single() {
        let provider = provider();
        let texts = vec![
            "Apa itu fotosintesis?".to_string(),
            "rust programming".to_string(),
        ];

        let batch = provider.embed_batch(&texts).await.unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], provider.embed(&texts[0]).await.unwrap());
        assert_eq!(batch[1], provider.embed(&texts[1]).await.unwrap());
    }

    #[tokio::test]
    async fn test_deterministic() {
        let first = provider().embed("deterministic test").await.unwrap();
        let second = provider().embed("deterministic test").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_similar_texts_score_higher() {
        let provider = provider();
        let query = provider.embed("photosynthesis in plants").await.unwrap();
        let related = provider
            .embed("Plants perform photosynthesis using sunlight")
            .await
            .unwrap();
        let unrelated = provider.embed("The stock market fell sharply").await.unwrap();

        assert!(cosine(&query, &related) > cosine(&query, &unrelated));
    }

    #[tokio::test]
    async fn test_stop_words_only_gives_zero_vector() {
        let embedding = provider().embed("the and of yang").await.unwrap();
        assert!(embedding.iter().all(|&x| x == 0.0));
    }

    #[tokio::test]
    async fn test_unnormalized_keeps_raw_weights() {
        let provider = TrigramProvider::new("trigram-v1", 64, false);
        let embedding = provider.embed("kata kata").await.unwrap();

        let total: f32 = embedding.iter().sum();
        assert!(total > 1.0);
    }

    #[tokio::test]
    async fn test_utf8_safety() {
        let embedding = provider()
            .embed("Gamedex é um aplicativo 🎮 brasileiro para gerenciar jogos!")
            .await
            .unwrap();

        assert_eq!(embedding.len(), 384);
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.001);
    }
}
