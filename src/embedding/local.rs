//! In-process embeddings via fastembed (ONNX runtime).
//!
//! The model is loaded on first use and the handle is cached for the lifetime
//! of the embedder. Concurrent first callers wait on the same load.

use super::{ensure_count, Embedder};
use crate::error::{DebriefError, Result};
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

/// Model used when none is configured.
pub const DEFAULT_LOCAL_MODEL: &str = "all-MiniLM-L6-v2";

/// Models the local embedder knows how to load, with their output dimension.
fn known_models() -> [(&'static str, EmbeddingModel, usize); 5] {
    [
        ("all-minilm-l6-v2", EmbeddingModel::AllMiniLML6V2, 384),
        ("all-minilm-l12-v2", EmbeddingModel::AllMiniLML12V2, 384),
        ("bge-small-en-v1.5", EmbeddingModel::BGESmallENV15, 384),
        ("bge-base-en-v1.5", EmbeddingModel::BGEBaseENV15, 768),
        ("nomic-embed-text-v1.5", EmbeddingModel::NomicEmbedTextV15, 768),
    ]
}

/// Map a configured model name to a fastembed model and its dimension.
///
/// Hub-style prefixes such as `sentence-transformers/` are ignored.
fn resolve_model(name: &str) -> Result<(EmbeddingModel, usize)> {
    let short = name.rsplit('/').next().unwrap_or(name).to_lowercase();

    known_models()
        .into_iter()
        .find(|(known, _, _)| *known == short)
        .map(|(_, model, dims)| (model, dims))
        .ok_or_else(|| DebriefError::ModelInit(format!("Unknown local embedding model: {}", name)))
}

/// Local embedder backed by a lazily loaded fastembed model.
pub struct LocalEmbedder {
    model_name: String,
    model: EmbeddingModel,
    dimensions: usize,
    cache_dir: Option<PathBuf>,
    handle: OnceCell<Arc<Mutex<TextEmbedding>>>,
}

impl LocalEmbedder {
    /// Create a local embedder for the default model.
    pub fn new() -> Result<Self> {
        Self::with_config(DEFAULT_LOCAL_MODEL, None)
    }

    /// Create a local embedder for a named model.
    ///
    /// Nothing is loaded until the first embedding request.
    pub fn with_config(model_name: &str, cache_dir: Option<PathBuf>) -> Result<Self> {
        let (model, dimensions) = resolve_model(model_name)?;
        Ok(Self {
            model_name: model_name.to_string(),
            model,
            dimensions,
            cache_dir,
            handle: OnceCell::new(),
        })
    }

    /// Load the model on first use, then return the cached handle.
    ///
    /// A failed load is not cached; the next call tries again.
    async fn handle(&self) -> Result<Arc<Mutex<TextEmbedding>>> {
        let handle = self
            .handle
            .get_or_try_init(|| async {
                info!("Loading embedding model: {}", self.model_name);

                let model = self.model.clone();
                let cache_dir = self.cache_dir.clone();
                let loaded = tokio::task::spawn_blocking(move || {
                    let mut options = InitOptions::new(model).with_show_download_progress(false);
                    if let Some(dir) = cache_dir {
                        options = options.with_cache_dir(dir);
                    }
                    TextEmbedding::try_new(options)
                })
                .await
                .map_err(|e| DebriefError::ModelInit(format!("Model loader task failed: {}", e)))?
                .map_err(|e| DebriefError::ModelInit(e.to_string()))?;

                info!("Embedder initialized successfully");
                Ok::<_, DebriefError>(Arc::new(Mutex::new(loaded)))
            })
            .await?;

        Ok(handle.clone())
    }
}

#[async_trait]
impl Embedder for LocalEmbedder {
    #[instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let handle = self.handle().await?;

        debug!("Generating embeddings for {} texts", texts.len());

        let input = texts.to_vec();
        let embeddings = tokio::task::spawn_blocking(move || {
            let model = handle
                .lock()
                .map_err(|_| DebriefError::Embedding("Embedding model lock poisoned".to_string()))?;
            model
                .embed(input, None)
                .map_err(|e| DebriefError::Embedding(e.to_string()))
        })
        .await
        .map_err(|e| DebriefError::Embedding(format!("Embedding task failed: {}", e)))??;

        ensure_count(texts.len(), &embeddings)?;

        debug!("Generated {} embeddings", embeddings.len());
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn is_ready(&self) -> bool {
        self.handle.initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_models() {
        assert_eq!(resolve_model("all-MiniLM-L6-v2").unwrap().1, 384);
        assert_eq!(resolve_model("sentence-transformers/all-MiniLM-L6-v2").unwrap().1, 384);
        assert_eq!(resolve_model("BAAI/bge-base-en-v1.5").unwrap().1, 768);
        assert!(matches!(
            resolve_model("bge-small-en-v1.5").unwrap().0,
            EmbeddingModel::BGESmallENV15
        ));
    }

    #[test]
    fn test_unknown_model_is_init_error() {
        assert!(matches!(
            LocalEmbedder::with_config("word2vec-classic", None),
            Err(DebriefError::ModelInit(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_batch_does_not_load_model() {
        let embedder = LocalEmbedder::new().unwrap();
        let embeddings = embedder.embed_batch(&[]).await.unwrap();
        assert!(embeddings.is_empty());
        assert!(!embedder.is_ready());
    }
}
