//! Embedding generation for semantic retrieval.

mod local;
mod openai;

pub use local::{LocalEmbedder, DEFAULT_LOCAL_MODEL};
pub use openai::OpenAIEmbedder;

use crate::config::EmbeddingSettings;
use crate::error::{DebriefError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for embedding generation.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| DebriefError::Embedding("Empty embedding response".to_string()))
    }

    /// Generate embeddings for multiple texts, one per input, in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;

    /// Name of the underlying model.
    fn model_name(&self) -> &str;

    /// Whether the model is loaded and ready to embed without further setup.
    fn is_ready(&self) -> bool {
        true
    }
}

/// Create an embedder from settings.
pub fn create_embedder(settings: &EmbeddingSettings) -> Result<Arc<dyn Embedder>> {
    match settings.provider.to_lowercase().as_str() {
        "local" | "fastembed" => Ok(Arc::new(LocalEmbedder::with_config(
            &settings.model,
            Some(settings.cache_dir()),
        )?)),
        "openai" => Ok(Arc::new(OpenAIEmbedder::with_config(
            &settings.model,
            settings.dimensions as usize,
        ))),
        other => Err(DebriefError::Config(format!(
            "Unknown embedding provider: {}",
            other
        ))),
    }
}

/// Check that a provider returned one vector per input.
pub(crate) fn ensure_count(expected: usize, embeddings: &[Vec<f32>]) -> Result<()> {
    if embeddings.len() != expected {
        return Err(DebriefError::Embedding(format!(
            "Expected {} embeddings, got {}",
            expected,
            embeddings.len()
        )));
    }
    Ok(())
}
