//! Interactive question loop over one meeting.

use super::{check_index, index_input};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive chat command.
pub async fn run_chat(input: &str, top_k: Option<usize>, settings: Settings) -> Result<()> {
    check_index(&settings)?;

    let k = top_k.unwrap_or(settings.retrieval.top_k);
    let orchestrator = Orchestrator::new(settings)?;

    index_input(&orchestrator, input).await?;
    let retrieval = orchestrator.retrieval();

    if let Some(stats) = retrieval.stats() {
        Output::success(&format!("Indexed {} chunks", stats.chunk_count));
    }

    println!("\n{}", style("Debrief Chat").bold().cyan());
    println!("{}\n", style("Ask about the meeting, or 'exit' to quit.").dim());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let question = line.trim();

        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        let answer = retrieval.answer(question, k).await;
        println!("\n{} {}\n", style("Debrief:").cyan().bold(), answer);
    }

    Ok(())
}
