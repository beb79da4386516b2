//! User-facing answer strings.

use super::RetrievedChunk;
use crate::error::{DebriefError, Result};

/// Returned when no transcript has been indexed.
pub const NOT_READY_MESSAGE: &str = "Please upload and process a video first to ask questions.";

/// Returned for an empty or whitespace-only question.
pub const INVALID_QUERY_MESSAGE: &str = "Please enter a valid question.";

/// Returned when retrieval finds no chunks.
pub const NOTHING_FOUND_MESSAGE: &str = "No relevant information found in the transcript.";

/// Prefix of every successful answer.
pub const ANSWER_LEAD_IN: &str = "Based on the meeting discussion:\n\n";

/// Returned for any other retrieval failure.
pub const RETRIEVAL_ERROR_MESSAGE: &str = "Error retrieving answer. Please try again.";

/// Turn a retrieval outcome into the answer shown to the user.
///
/// Chunks are joined with a blank line in the order given, which is closest first.
pub fn render_answer(result: &Result<Vec<RetrievedChunk>>) -> String {
    match result {
        Ok(chunks) if chunks.is_empty() => NOTHING_FOUND_MESSAGE.to_string(),
        Ok(chunks) => {
            let body = chunks
                .iter()
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n");
            format!("{}{}", ANSWER_LEAD_IN, body)
        }
        Err(DebriefError::IndexNotReady) => NOT_READY_MESSAGE.to_string(),
        Err(DebriefError::EmptyInput(_)) => INVALID_QUERY_MESSAGE.to_string(),
        Err(_) => RETRIEVAL_ERROR_MESSAGE.to_string(),
    }
}
