//! Build and query orchestration for one live corpus.

use super::{render_answer, Corpus, CorpusStats, RetrievedChunk};
use crate::chunking::{Chunk, LineChunker};
use crate::config::Settings;
use crate::embedding::{create_embedder, Embedder};
use crate::error::{DebriefError, Result};
use std::sync::{Arc, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument};

/// Owns the embedder and the currently live corpus.
///
/// At most one corpus is live. Builds assemble a complete corpus off to the side
/// and swap it in; queries take a snapshot, so they see either a whole corpus or
/// none. A failed build leaves the service not ready.
///
/// Builds run one at a time in the order they were called, so the live corpus
/// always belongs to the most recent build call.
pub struct RetrievalService {
    embedder: Arc<dyn Embedder>,
    chunker: LineChunker,
    corpus: RwLock<Option<Arc<Corpus>>>,
    build_lock: Mutex<()>,
}

impl RetrievalService {
    /// Create a service with no corpus.
    pub fn new(embedder: Arc<dyn Embedder>, chunker: LineChunker) -> Self {
        Self {
            embedder,
            chunker,
            corpus: RwLock::new(None),
            build_lock: Mutex::new(()),
        }
    }

    /// Create a service from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let embedder = create_embedder(&settings.embedding)?;
        let chunker = LineChunker::new(settings.chunking.lines_per_chunk)?;
        Ok(Self::new(embedder, chunker))
    }

    /// The embedder used for chunks and queries.
    pub fn embedder(&self) -> Arc<dyn Embedder> {
        self.embedder.clone()
    }

    /// Whether a corpus is live.
    pub fn is_ready(&self) -> bool {
        self.snapshot().is_some()
    }

    /// Statistics for the live corpus.
    pub fn stats(&self) -> Option<CorpusStats> {
        self.snapshot().map(|c| c.stats())
    }

    /// Chunks of the live corpus, in position order.
    pub fn chunks(&self) -> Option<Vec<Chunk>> {
        self.snapshot().map(|c| c.chunks().to_vec())
    }

    /// Drop the live corpus.
    pub fn clear(&self) {
        self.replace(None);
    }

    /// Index a transcript, replacing any previous corpus.
    ///
    /// Returns `true` when the new corpus is live. Failures are logged and leave
    /// the service not ready.
    pub async fn build_corpus(&self, transcript: &str) -> bool {
        match self.try_build_corpus(transcript).await {
            Ok(_) => true,
            Err(e) => {
                error!("Error building vector store: {}", e);
                false
            }
        }
    }

    /// Index a transcript, replacing any previous corpus.
    #[instrument(skip(self, transcript), fields(len = transcript.len()))]
    pub async fn try_build_corpus(&self, transcript: &str) -> Result<CorpusStats> {
        // Held across assemble and swap; waiters are served first come, first served.
        let _guard = self.build_lock.lock().await;

        match self.assemble(transcript).await {
            Ok(corpus) => {
                let stats = corpus.stats();
                self.replace(Some(Arc::new(corpus)));
                info!(
                    "Corpus {} built: {} chunks, dimension {}",
                    stats.corpus_id, stats.chunk_count, stats.dimensions
                );
                Ok(stats)
            }
            Err(e) => {
                self.replace(None);
                Err(e)
            }
        }
    }

    /// Answer a question with the `k` nearest transcript chunks.
    ///
    /// Never fails: every outcome is rendered as a message.
    pub async fn answer(&self, query: &str, k: usize) -> String {
        let result = self.retrieve(query, k).await;
        if let Err(e) = &result {
            match e {
                DebriefError::IndexNotReady | DebriefError::EmptyInput(_) => {
                    debug!("Question not answered: {}", e)
                }
                _ => error!("Error answering question: {}", e),
            }
        }
        render_answer(&result)
    }

    /// Retrieve the `k` nearest chunks for a question, closest first.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn retrieve(&self, query: &str, k: usize) -> Result<Vec<RetrievedChunk>> {
        if query.trim().is_empty() {
            return Err(DebriefError::EmptyInput("query is empty".to_string()));
        }

        let corpus = self.snapshot().ok_or(DebriefError::IndexNotReady)?;

        if k == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await.map_err(|e| match e {
            DebriefError::ModelInit(_) => e,
            other => DebriefError::Retrieval(format!("query embedding failed: {}", other)),
        })?;
        let retrieved = corpus
            .search(&query_embedding, k)
            .map_err(|e| DebriefError::Retrieval(format!("search failed: {}", e)))?;

        debug!("Retrieved {} chunks from corpus {}", retrieved.len(), corpus.id());
        Ok(retrieved)
    }

    async fn assemble(&self, transcript: &str) -> Result<Corpus> {
        if transcript.trim().is_empty() {
            return Err(DebriefError::EmptyInput("transcript is empty".to_string()));
        }

        let chunks = self.chunker.chunk(transcript);
        if chunks.is_empty() {
            return Err(DebriefError::EmptyInput("no valid chunks created".to_string()));
        }
        info!("Split transcript into {} chunks", chunks.len());

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        Corpus::new(chunks, &embeddings)
    }

    fn snapshot(&self) -> Option<Arc<Corpus>> {
        self.corpus
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn replace(&self, corpus: Option<Arc<Corpus>>) {
        *self
            .corpus
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = corpus;
    }
}
