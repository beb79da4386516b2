//! Ask command implementation.

use super::{check_index, index_input};
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    input: &str,
    question: &str,
    top_k: Option<usize>,
    settings: Settings,
) -> Result<()> {
    check_index(&settings)?;

    let k = top_k.unwrap_or(settings.retrieval.top_k);
    let orchestrator = Orchestrator::new(settings)?;

    index_input(&orchestrator, input).await?;

    let answer = orchestrator.retrieval().answer(question, k).await;
    println!("\n{}\n", answer);

    Ok(())
}
