//! Search command implementation.

use super::{check_index, index_input};
use crate::chunking::Chunk;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(
    input: &str,
    query: &str,
    top_k: Option<usize>,
    settings: Settings,
) -> Result<()> {
    check_index(&settings)?;

    let k = top_k.unwrap_or(settings.retrieval.top_k);
    let orchestrator = Orchestrator::new(settings)?;

    index_input(&orchestrator, input).await?;

    let spinner = Output::spinner("Searching...");
    let results = orchestrator.retrieval().retrieve(query, k).await;
    spinner.finish_and_clear();

    match results {
        Ok(chunks) => {
            if chunks.is_empty() {
                Output::warning("No results found matching your query.");
            } else {
                Output::success(&format!("Found {} results", chunks.len()));

                for hit in &chunks {
                    let preview = Chunk::new(hit.position, hit.text.clone()).preview(200);
                    Output::search_result(hit.position, hit.distance, &preview);
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
