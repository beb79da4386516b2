//! CLI module for Debrief.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Debrief - Meeting transcript insights and retrieval
///
/// Summarize a meeting, list its action items, and ask questions answered with
/// the most relevant transcript excerpts.
#[derive(Parser, Debug)]
#[command(name = "debrief")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a meeting recording or transcript: summary, action items, index
    Process {
        /// Transcript (.txt, .md) or video (.mp4, .avi, .mov, .mkv) file
        input: String,

        /// Skip summary and action item generation
        #[arg(long)]
        no_insights: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask a question about a meeting
    Ask {
        /// Transcript or video file
        input: String,

        /// The question to ask
        question: String,

        /// Number of transcript excerpts to return
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Show the transcript chunks nearest to a query, with distances
    Search {
        /// Transcript or video file
        input: String,

        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Ask questions about a meeting interactively
    Chat {
        /// Transcript or video file
        input: String,

        /// Number of transcript excerpts per answer
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Start HTTP API server for integration with other systems
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Write the default configuration file if none exists
    Init,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let cli = Cli::try_parse_from(["debrief", "-vv", "ask", "meeting.txt", "Who owns the report?", "-k", "5"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Ask { input, question, top_k } => {
                assert_eq!(input, "meeting.txt");
                assert_eq!(question, "Who owns the report?");
                assert_eq!(top_k, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_process_flags() {
        let cli = Cli::try_parse_from(["debrief", "process", "q1.mp4", "--no-insights"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Process { no_insights: true, json: false, .. }
        ));
    }
}
