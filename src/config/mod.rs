//! Configuration module for Debrief.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{InsightPrompts, Prompts};
pub use settings::{
    ChunkingSettings, EmbeddingSettings, GeneralSettings, InsightSettings, PromptSettings,
    RetrievalSettings, Settings,
};
