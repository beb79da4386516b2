//! Transcript chunking for retrieval.
//!
//! Splits a transcript into groups of consecutive lines. Each group becomes one
//! retrievable chunk whose position matches its row in the vector index.

use crate::error::{DebriefError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default number of transcript lines per chunk.
pub const DEFAULT_LINES_PER_CHUNK: usize = 3;

/// A contiguous group of transcript lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Zero-based position, dense over the kept chunks.
    pub position: usize,
    /// The grouped lines joined with `\n`.
    pub text: String,
}

impl Chunk {
    /// Create a new chunk.
    pub fn new(position: usize, text: String) -> Self {
        Self { position, text }
    }

    /// Number of lines in this chunk.
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    /// Single-line preview, truncated to `max_chars` characters.
    pub fn preview(&self, max_chars: usize) -> String {
        let flat = self.text.replace('\n', " ");
        if flat.chars().count() <= max_chars {
            flat
        } else {
            let cut: String = flat.chars().take(max_chars).collect();
            format!("{}...", cut)
        }
    }
}

/// Fixed-size line chunker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineChunker {
    lines_per_chunk: usize,
}

impl LineChunker {
    /// Create a chunker grouping `lines_per_chunk` lines per chunk.
    pub fn new(lines_per_chunk: usize) -> Result<Self> {
        if lines_per_chunk == 0 {
            return Err(DebriefError::Config(
                "chunking.lines_per_chunk must be at least 1".to_string(),
            ));
        }
        Ok(Self { lines_per_chunk })
    }

    /// Lines grouped into each chunk.
    pub fn lines_per_chunk(&self) -> usize {
        self.lines_per_chunk
    }

    /// Split a transcript into chunks.
    ///
    /// Groups whose text is blank are dropped and positions are assigned densely
    /// over what remains. An empty or whitespace-only transcript yields no chunks.
    pub fn chunk(&self, transcript: &str) -> Vec<Chunk> {
        let trimmed = transcript.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let lines: Vec<&str> = trimmed.lines().collect();
        let chunks: Vec<Chunk> = lines
            .chunks(self.lines_per_chunk)
            .map(|group| group.join("\n"))
            .filter(|text| !text.trim().is_empty())
            .enumerate()
            .map(|(position, text)| Chunk::new(position, text))
            .collect();

        debug!(
            "Split {} lines into {} chunks of up to {} lines",
            lines.len(),
            chunks.len(),
            self.lines_per_chunk
        );

        chunks
    }
}

impl Default for LineChunker {
    fn default() -> Self {
        Self {
            lines_per_chunk: DEFAULT_LINES_PER_CHUNK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_lines_in_threes() {
        let chunks = LineChunker::default().chunk("line1\nline2\nline3\nline4\nline5");

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], Chunk::new(0, "line1\nline2\nline3".to_string()));
        assert_eq!(chunks[1], Chunk::new(1, "line4\nline5".to_string()));
    }

    #[test]
    fn test_empty_transcript_yields_no_chunks() {
        let chunker = LineChunker::default();
        assert!(chunker.chunk("").is_empty());
        assert!(chunker.chunk("   \n\t\n  ").is_empty());
    }

    #[test]
    fn test_blank_groups_dropped_and_positions_dense() {
        let chunker = LineChunker::new(2).unwrap();
        let transcript = "a\nb\n\n \nc\nd\n\n\ne";

        let chunks = chunker.chunk(transcript);
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["a\nb", "c\nd", "e"]);

        let positions: Vec<usize> = chunks.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_chunk_text_matches_line_slices() {
        let lines: Vec<String> = (0..10).map(|i| format!("[00:{:02}] Speaker 1: point {}", i, i)).collect();
        let transcript = lines.join("\n");

        for size in 1..=4 {
            let chunks = LineChunker::new(size).unwrap().chunk(&transcript);
            assert_eq!(chunks.len(), lines.len().div_ceil(size));
            for chunk in &chunks {
                let start = chunk.position * size;
                let end = (start + size).min(lines.len());
                assert_eq!(chunk.text, lines[start..end].join("\n"));
            }
        }
    }

    #[test]
    fn test_zero_lines_per_chunk_rejected() {
        assert!(matches!(LineChunker::new(0), Err(DebriefError::Config(_))));
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let chunk = Chunk::new(0, "héllo\nwörld".to_string());
        assert_eq!(chunk.preview(50), "héllo wörld");
        assert_eq!(chunk.preview(3), "hél...");
        assert_eq!(chunk.line_count(), 2);
    }
}
