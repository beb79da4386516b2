//! Retrieval over a single meeting transcript.
//!
//! A transcript is chunked, embedded and indexed into a [`Corpus`]; questions are
//! embedded and answered with the nearest chunks.

mod answer;
mod corpus;
mod service;

pub use answer::{
    render_answer, ANSWER_LEAD_IN, INVALID_QUERY_MESSAGE, NOTHING_FOUND_MESSAGE,
    NOT_READY_MESSAGE, RETRIEVAL_ERROR_MESSAGE,
};
pub use corpus::{Corpus, CorpusStats};
pub use service::RetrievalService;

use serde::{Deserialize, Serialize};

/// A chunk returned for a query, with its distance from the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Position of the chunk in the corpus.
    pub position: usize,
    /// Squared Euclidean distance to the query embedding.
    pub distance: f32,
    /// Chunk text.
    pub text: String,
}
