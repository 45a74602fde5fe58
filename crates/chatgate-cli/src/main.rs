//! CLI entry point - the composition root.

use anyhow::Context;
use chatgate_cli::{Cli, Commands, ServeArgs, handlers, logging};
use chatgate_core::ProxyConfig;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before reading configuration
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(&cli.log_level);

    let base = ProxyConfig::from_env().context("Invalid environment configuration")?;

    match cli.command {
        None => handlers::serve::execute(ServeArgs::default().apply(base)?).await,
        Some(Commands::Serve(args)) => handlers::serve::execute(args.apply(base)?).await,
        Some(Commands::Check(args)) => handlers::check::execute(&args.apply(base)?).await,
    }
}
