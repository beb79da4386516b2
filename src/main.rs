//! Debrief CLI entry point.

use anyhow::Result;
use clap::Parser;
use debrief::cli::{commands, Cli, Commands};
use debrief::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("debrief={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    std::fs::create_dir_all(settings.data_dir())?;

    match &cli.command {
        Commands::Process { input, no_insights, json } => {
            commands::run_process(input, *no_insights, *json, settings).await?;
        }

        Commands::Ask { input, question, top_k } => {
            commands::run_ask(input, question, *top_k, settings).await?;
        }

        Commands::Search { input, query, top_k } => {
            commands::run_search(input, query, *top_k, settings).await?;
        }

        Commands::Chat { input, top_k } => {
            commands::run_chat(input, *top_k, settings).await?;
        }

        Commands::Serve { host, port } => {
            commands::run_serve(host, *port, settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings)?;
        }
    }

    Ok(())
}
