//! Remote embeddings through the OpenAI embeddings endpoint.
//!
//! Used when `embedding.provider = "openai"`; the key comes from
//! `OPENAI_API_KEY`.

use super::{ensure_count, Embedder};
use crate::error::{DebriefError, Result};
use crate::openai::create_client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{CreateEmbeddingRequestArgs, EmbeddingInput};
use async_openai::Client;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Upper bound on inputs sent in one embeddings request.
const MAX_INPUTS_PER_REQUEST: usize = 100;

pub struct OpenAIEmbedder {
    client: Client<OpenAIConfig>,
    model: String,
    dimensions: usize,
}

impl OpenAIEmbedder {
    /// `dimensions` is requested from the API, so shortened vectors work for
    /// the `text-embedding-3-*` family.
    pub fn with_config(model: &str, dimensions: usize) -> Self {
        Self {
            client: create_client(),
            model: model.to_string(),
            dimensions,
        }
    }

    /// Embed one request's worth of transcript chunks, in input order.
    async fn embed_request(&self, inputs: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(EmbeddingInput::StringArray(inputs.to_vec()))
            .dimensions(self.dimensions as u32)
            .build()
            .map_err(|e| DebriefError::Embedding(format!("invalid embeddings request: {}", e)))?;

        let mut data = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| DebriefError::OpenAI(format!("embeddings request failed: {}", e)))?
            .data;

        data.sort_by_key(|item| item.index);
        Ok(data.into_iter().map(|item| item.embedding).collect())
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    #[instrument(skip(self, texts), fields(count = texts.len(), model = %self.model))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut vectors = Vec::with_capacity(texts.len());
        for inputs in texts.chunks(MAX_INPUTS_PER_REQUEST) {
            vectors.extend(self.embed_request(inputs).await?);
        }
        ensure_count(texts.len(), &vectors)?;

        debug!(
            "Embedded {} chunks remotely in {} request(s)",
            vectors.len(),
            texts.len().div_ceil(MAX_INPUTS_PER_REQUEST)
        );
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
