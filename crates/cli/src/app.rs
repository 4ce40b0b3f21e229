use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::{handle_config_command, handle_recommend_command};

/// Initialise logging, parse the command line and dispatch.
///
/// Logs go to stderr so stdout carries only the command's output.
pub fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Recommend(args) => handle_recommend_command(args),
        Commands::Config { config } => handle_config_command(config),
    }
}
