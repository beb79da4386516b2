//! Turning an input file into a transcript.
//!
//! Text transcripts are read as-is. Video files are copied into the temp
//! directory and stand in for a transcription step: the built-in sample
//! transcript is returned for them.

use crate::error::{DebriefError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Extensions read directly as transcripts.
const TRANSCRIPT_EXTENSIONS: &[&str] = &["txt", "md"];

/// Accepted video extensions.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv"];

/// Kind of input a file was recognised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Plain-text transcript.
    Transcript,
    /// Meeting recording.
    Video,
}

impl MediaKind {
    /// Classify a path by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if TRANSCRIPT_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Transcript)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

/// A transcript obtained from an input file.
#[derive(Debug, Clone)]
pub struct IngestedMedia {
    /// How the input was treated.
    pub kind: MediaKind,
    /// Where the video was copied to, for video inputs.
    pub stored_at: Option<PathBuf>,
    /// Newline-delimited transcript text.
    pub transcript: String,
}

/// Reads transcripts and stages uploaded videos.
pub struct MediaIngestor {
    temp_dir: PathBuf,
}

impl MediaIngestor {
    /// Create an ingestor that stages videos under `temp_dir`.
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            temp_dir: temp_dir.into(),
        }
    }

    /// Produce a transcript for the file at `path`.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn process(&self, path: &Path) -> Result<IngestedMedia> {
        if !path.is_file() {
            return Err(DebriefError::InvalidInput(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let kind = MediaKind::from_path(path).ok_or_else(|| {
            DebriefError::UnsupportedMedia(format!(
                "{} (expected one of: {}, {})",
                path.display(),
                TRANSCRIPT_EXTENSIONS.join(", "),
                VIDEO_EXTENSIONS.join(", ")
            ))
        })?;

        let (stored_at, transcript) = match kind {
            MediaKind::Transcript => (None, tokio::fs::read_to_string(path).await?),
            MediaKind::Video => {
                let stored = self.stage_video(path).await?;
                info!("Video saved temporarily at: {}", stored.display());
                (Some(stored), sample_transcript().to_string())
            }
        };

        if transcript.trim().is_empty() {
            return Err(DebriefError::EmptyInput(format!(
                "No transcript text in {}",
                path.display()
            )));
        }

        info!("Media processing completed ({} lines)", transcript.lines().count());

        Ok(IngestedMedia {
            kind,
            stored_at,
            transcript,
        })
    }

    /// Copy a video into the temp directory as `meeting_<file name>`.
    async fn stage_video(&self, path: &Path) -> Result<PathBuf> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DebriefError::InvalidInput(format!("Invalid file name: {}", path.display())))?;

        tokio::fs::create_dir_all(&self.temp_dir).await?;
        let target = self.temp_dir.join(format!("meeting_{}", file_name));
        tokio::fs::copy(path, &target).await?;

        Ok(target)
    }
}

/// Timestamped transcript returned for video inputs.
pub fn sample_transcript() -> &'static str {
    "[00:00] Speaker 1: Welcome everyone to the meeting. Thank you for joining today's discussion on our Q1 roadmap.

[00:15] Speaker 2: Thanks for having us. We need to finalize the deployment timeline and allocate resources properly.

[00:45] Speaker 1: The deadline is next Friday. We have about two weeks to complete all the necessary preparations.

[01:10] Speaker 3: I'll need clarification on the budget allocation. Are we looking at the same numbers as last quarter?

[01:35] Speaker 1: Yes, the budget remains consistent. However, we might need to reallocate some funds based on the new requirements from the product team.

[02:05] Speaker 2: What about the infrastructure changes? Have we finalized the cloud migration strategy?

[02:30] Speaker 1: The cloud migration is set to begin next month. We've already started the initial setup and testing phase.

[02:55] Speaker 3: That's great news. I'll coordinate with my team to ensure we're ready for the transition. We should schedule a separate meeting for technical details.

[03:20] Speaker 1: Excellent. Let's schedule that for next week. In the meantime, please send me your department's readiness report by Wednesday.

[03:45] Speaker 2: One more thing - we need to establish communication protocols. Should we use daily standups or weekly syncs?"
}
