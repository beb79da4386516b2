//! Debrief - Meeting transcript insights and retrieval
//!
//! A local-first CLI tool that summarizes a meeting, extracts its action items,
//! and answers questions with the transcript excerpts most relevant to them.
//!
//! # Architecture
//!
//! - `config` - Configuration management
//! - `ingest` - Reading transcripts and staging meeting recordings
//! - `chunking` - Fixed-size line grouping
//! - `embedding` - Embedding generation (local fastembed or OpenAI)
//! - `vector_store` - Exact nearest-neighbor index
//! - `rag` - Corpus building and question answering
//! - `insights` - Summary and action items from a chat model
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use debrief::config::Settings;
//! use debrief::rag::RetrievalService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = RetrievalService::from_settings(&Settings::default())?;
//!
//!     if service.build_corpus("[00:00] Speaker 1: The deadline is Friday.").await {
//!         println!("{}", service.answer("When is the deadline?", 3).await);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod ingest;
pub mod insights;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod vector_store;

pub use error::{DebriefError, Result};
