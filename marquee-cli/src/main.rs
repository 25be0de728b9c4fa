//! Marquee CLI - Movie search from the terminal
//!
//! Provides one-shot search and lookup commands and an interactive session
//! that drives the debounced search widget from stdin.

mod commands;
mod interactive;
mod render;

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use marquee_core::MarqueeConfig;
use marquee_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Debounced movie search backed by OMDb")]
struct Cli {
    /// Console log level (RUST_LOG overrides)
    #[arg(long, value_enum, default_value_t = CliLogLevel::Warn, global = true)]
    log_level: CliLogLevel,
    /// Directory for the full trace log of this run
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,
    /// Use bundled demo titles instead of the OMDb API
    #[arg(long, global = true)]
    demo: bool,
    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let trace_log = init_tracing(cli.log_level.as_tracing_level(), cli.logs_dir.as_deref())
        .map_err(|e| anyhow!("failed to initialize tracing: {e}"))?;
    tracing::debug!(path = %trace_log.display(), "Trace log initialized");

    let config = MarqueeConfig::from_env();
    config.validate().map_err(|e| anyhow!(e.user_message()))?;
    tracing::info!(
        base_url = %config.catalog.base_url,
        demo = cli.demo,
        "Starting marquee"
    );

    commands::handle_command(cli.command, config, cli.demo).await
}
