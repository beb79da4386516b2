//! Pipeline orchestrator for Debrief.
//!
//! Coordinates one meeting session: ingest the input, optionally generate
//! insights, then index the transcript for questions.

use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::ingest::{MediaIngestor, MediaKind};
use crate::insights::{InsightGenerator, MeetingInsights};
use crate::rag::{CorpusStats, RetrievalService};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// The main orchestrator for the Debrief pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    ingestor: MediaIngestor,
    retrieval: Arc<RetrievalService>,
}

impl Orchestrator {
    /// Create a new orchestrator from settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let retrieval = Arc::new(RetrievalService::from_settings(&settings)?);
        Self::with_components(settings, retrieval)
    }

    /// Create an orchestrator around an existing retrieval service.
    pub fn with_components(settings: Settings, retrieval: Arc<RetrievalService>) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let ingestor = MediaIngestor::new(settings.temp_dir());

        Ok(Self {
            settings,
            prompts,
            ingestor,
            retrieval,
        })
    }

    /// Get the retrieval service.
    pub fn retrieval(&self) -> Arc<RetrievalService> {
        self.retrieval.clone()
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Load a transcript from a file without indexing it.
    pub async fn load_transcript(&self, input: &Path) -> Result<String> {
        Ok(self.ingestor.process(input).await?.transcript)
    }

    /// Ingest a file and index its transcript, generating insights if asked.
    ///
    /// Insights are produced before indexing; a failure at any step is returned
    /// and leaves no corpus live.
    #[instrument(skip(self), fields(input = %input.display()))]
    pub async fn process_media(&self, input: &Path, with_insights: bool) -> Result<ProcessResult> {
        let media = self.ingestor.process(input).await?;

        let insights = if with_insights {
            let generator =
                InsightGenerator::from_settings(&self.settings.insights, self.prompts.clone())?;
            Some(generator.generate(&media.transcript).await?)
        } else {
            None
        };

        let corpus = self.retrieval.try_build_corpus(&media.transcript).await?;

        info!("Indexed {} chunks from {}", corpus.chunk_count, input.display());

        Ok(ProcessResult {
            kind: media.kind,
            transcript: media.transcript,
            insights,
            corpus,
        })
    }
}

/// Result of processing one input.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    /// How the input was treated.
    pub kind: MediaKind,
    /// Transcript that was indexed.
    pub transcript: String,
    /// Summary and action items, when requested.
    pub insights: Option<MeetingInsights>,
    /// The corpus now live.
    pub corpus: CorpusStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::LineChunker;
    use crate::embedding::Embedder;
    use crate::rag::ANSWER_LEAD_IN;
    use async_trait::async_trait;

    /// Embeds every text as its length, enough to exercise the pipeline.
    struct LengthEmbedder;

    #[async_trait]
    impl Embedder for LengthEmbedder {
        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| vec![t.len() as f32]).collect())
        }

        fn dimensions(&self) -> usize {
            1
        }

        fn model_name(&self) -> &str {
            "length"
        }
    }

    fn orchestrator(temp: &Path) -> Orchestrator {
        let mut settings = Settings::default();
        settings.general.temp_dir = temp.join("staging").display().to_string();
        let retrieval = Arc::new(RetrievalService::new(Arc::new(LengthEmbedder), LineChunker::default()));
        Orchestrator::with_components(settings, retrieval).unwrap()
    }

    #[tokio::test]
    async fn test_process_transcript_without_insights() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sync.txt");
        std::fs::write(&path, "a\nb\nc\nd").unwrap();

        let orchestrator = orchestrator(dir.path());
        let result = orchestrator.process_media(&path, false).await.unwrap();

        assert_eq!(result.kind, MediaKind::Transcript);
        assert!(result.insights.is_none());
        assert_eq!(result.corpus.chunk_count, 2);

        let answer = orchestrator.retrieval().answer("a question", 1).await;
        assert!(answer.starts_with(ANSWER_LEAD_IN));
    }

    #[tokio::test]
    async fn test_process_video_indexes_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("allhands.mov");
        std::fs::write(&path, b"frames").unwrap();

        let orchestrator = orchestrator(dir.path());
        let result = orchestrator.process_media(&path, false).await.unwrap();

        assert_eq!(result.kind, MediaKind::Video);
        assert!(orchestrator.retrieval().is_ready());
        assert!(dir.path().join("staging").join("meeting_allhands.mov").exists());
    }

    #[tokio::test]
    async fn test_missing_insights_key_leaves_service_unbuilt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sync.txt");
        std::fs::write(&path, "a\nb\nc").unwrap();

        let mut orchestrator = orchestrator(dir.path());
        orchestrator.settings.insights.api_key_env = "DEBRIEF_TEST_NO_SUCH_KEY".to_string();

        assert!(orchestrator.process_media(&path, true).await.is_err());
        assert!(!orchestrator.retrieval().is_ready());
    }
}
