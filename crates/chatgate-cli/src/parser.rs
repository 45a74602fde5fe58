//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Translation proxy from the OpenAI chat-completions API to an anonymous
/// conversational backend.
#[derive(Debug, Parser)]
#[command(name = "chatgate")]
#[command(about = "Serve an OpenAI-compatible endpoint in front of an anonymous chat backend")]
#[command(version)]
pub struct Cli {
    /// Log filter when RUST_LOG is unset (e.g. "info", "chatgate_proxy=debug")
    #[arg(long = "log-level", global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
