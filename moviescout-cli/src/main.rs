//! MovieScout CLI - Command-line interface
//!
//! Runs movie searches against OMDb (or the offline demo catalogue) and
//! prints the session state.

mod commands;
mod tracing_setup;

use std::path::PathBuf;

use clap::Parser;
use tracing_setup::CliLogLevel;

#[derive(Parser)]
#[command(name = "moviescout")]
#[command(about = "Search OMDb and collect deduplicated results")]
#[command(version)]
struct Cli {
    /// Console log level (RUST_LOG overrides)
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: CliLogLevel,

    /// Also write a full trace log into this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Use the built-in demo catalogue instead of OMDb
    #[arg(long, global = true)]
    demo: bool,

    /// Print the session state as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_setup::init_tracing(cli.log_level.as_tracing_level(), cli.log_dir.as_deref())?;

    let options = commands::RunOptions {
        demo: cli.demo,
        json: cli.json,
    };
    commands::handle_command(cli.command, options).await
}
