//! Process command implementation.

use super::check_index;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{Orchestrator, ProcessResult};
use anyhow::Result;
use std::path::Path;

/// Run the process command.
pub async fn run_process(input: &str, no_insights: bool, json: bool, settings: Settings) -> Result<()> {
    let with_insights = settings.insights.enabled && !no_insights;

    if with_insights {
        if let Err(e) = preflight::check(Operation::Insights, &settings) {
            Output::error(&format!("{}", e));
            Output::info("Pass --no-insights to index the transcript only.");
            return Err(e.into());
        }
    }
    check_index(&settings)?;

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Processing meeting...");
    let result = orchestrator.process_media(Path::new(input), with_insights).await;
    spinner.finish_and_clear();

    match result {
        Ok(result) if json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Ok(result) => print_result(&result),
        Err(e) => {
            Output::error(&format!("Failed to process {}: {}", input, e));
            return Err(e.into());
        }
    }

    Ok(())
}

fn print_result(result: &ProcessResult) {
    Output::success("Meeting processed successfully!");

    if let Some(insights) = &result.insights {
        Output::header("Meeting Summary");
        println!("{}", insights.summary);

        Output::header("Action Items");
        if insights.action_items.is_empty() {
            Output::warning("Action items not available.");
        }
        for item in &insights.action_items {
            Output::list_item(item);
        }
    }

    Output::header("Index");
    Output::kv("Chunks", &result.corpus.chunk_count.to_string());
    Output::kv("Dimensions", &result.corpus.dimensions.to_string());
    Output::kv("Corpus", &result.corpus.corpus_id.to_string());
}
