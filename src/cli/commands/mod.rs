//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod process;
mod search;
mod serve;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use process::run_process;
pub use search::run_search;
pub use serve::run_serve;

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use std::path::Path;

/// Load a transcript from `input` and index it, reporting failures to the user.
async fn index_input(orchestrator: &Orchestrator, input: &str) -> anyhow::Result<()> {
    let transcript = match orchestrator.load_transcript(Path::new(input)).await {
        Ok(t) => t,
        Err(e) => {
            Output::error(&format!("Failed to read {}: {}", input, e));
            return Err(e.into());
        }
    };

    let spinner = Output::spinner("Indexing transcript...");
    let ready = orchestrator.retrieval().build_corpus(&transcript).await;
    spinner.finish_and_clear();

    if !ready {
        Output::error("Failed to index the transcript. Run with -v for details.");
        anyhow::bail!("transcript indexing failed");
    }
    Ok(())
}

/// Run the indexing pre-flight check, printing any problem.
fn check_index(settings: &Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Index, settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }
    Ok(())
}
