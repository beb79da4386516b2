//! An immutable, fully indexed transcript.

use super::RetrievedChunk;
use crate::chunking::Chunk;
use crate::error::{DebriefError, Result};
use crate::vector_store::FlatIndex;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// Chunks of one transcript together with their index.
///
/// Chunk `i` is row `i` of the index. A corpus is never modified after it is
/// built; rebuilding produces a new one.
#[derive(Debug)]
pub struct Corpus {
    id: Uuid,
    chunks: Vec<Chunk>,
    index: FlatIndex,
    built_at: DateTime<Utc>,
}

/// Summary information about a built corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Identifier assigned at build time.
    pub corpus_id: Uuid,
    /// Number of indexed chunks.
    pub chunk_count: usize,
    /// Embedding dimension.
    pub dimensions: usize,
    /// When the corpus was built.
    pub built_at: DateTime<Utc>,
}

impl Corpus {
    /// Index `chunks` using one embedding per chunk, in the same order.
    pub fn new(chunks: Vec<Chunk>, embeddings: &[Vec<f32>]) -> Result<Self> {
        if chunks.len() != embeddings.len() {
            return Err(DebriefError::Embedding(format!(
                "Expected {} embeddings, got {}",
                chunks.len(),
                embeddings.len()
            )));
        }

        if chunks.iter().enumerate().any(|(i, c)| c.position != i) {
            return Err(DebriefError::InvalidInput(
                "Chunk positions must be contiguous from 0".to_string(),
            ));
        }

        let index = FlatIndex::build(embeddings)?;

        Ok(Self {
            id: Uuid::new_v4(),
            chunks,
            index,
            built_at: Utc::now(),
        })
    }

    /// Corpus identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Chunks in position order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Summary of this corpus.
    pub fn stats(&self) -> CorpusStats {
        CorpusStats {
            corpus_id: self.id,
            chunk_count: self.chunks.len(),
            dimensions: self.index.dimensions(),
            built_at: self.built_at,
        }
    }

    /// Find the `k` chunks nearest to `query_embedding`, closest first.
    pub fn search(&self, query_embedding: &[f32], k: usize) -> Result<Vec<RetrievedChunk>> {
        let neighbors = self.index.search(query_embedding, k)?;

        let retrieved = neighbors
            .into_iter()
            .filter_map(|n| match self.chunks.get(n.position) {
                Some(chunk) => Some(RetrievedChunk {
                    position: n.position,
                    distance: n.distance,
                    text: chunk.text.clone(),
                }),
                None => {
                    warn!("Index returned position {} outside corpus of {}", n.position, self.chunks.len());
                    None
                }
            })
            .collect();

        Ok(retrieved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunks(texts: &[&str]) -> Vec<Chunk> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Chunk::new(i, t.to_string()))
            .collect()
    }

    #[test]
    fn test_search_maps_positions_to_text() {
        let corpus = Corpus::new(
            chunks(&["alpha", "beta", "gamma"]),
            &[vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]],
        )
        .unwrap();

        let results = corpus.search(&[2.1, 2.1], 2).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].text, "gamma");
        assert_eq!(results[0].position, 2);
        assert_eq!(results[1].text, "beta");

        let stats = corpus.stats();
        assert_eq!(stats.chunk_count, 3);
        assert_eq!(stats.dimensions, 2);
        assert_eq!(stats.corpus_id, corpus.id());
    }

    #[test]
    fn test_embedding_count_must_match() {
        let err = Corpus::new(chunks(&["alpha", "beta"]), &[vec![0.0]]).unwrap_err();
        assert!(matches!(err, DebriefError::Embedding(_)));
    }

    #[test]
    fn test_positions_must_be_contiguous() {
        let gapped = vec![Chunk::new(0, "a".to_string()), Chunk::new(2, "b".to_string())];
        let err = Corpus::new(gapped, &[vec![0.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, DebriefError::InvalidInput(_)));
    }

    #[test]
    fn test_mismatched_dimensions_rejected() {
        let err = Corpus::new(chunks(&["a", "b"]), &[vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, DebriefError::DimensionMismatch { .. }));
    }
}
