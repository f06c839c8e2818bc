//! Admissions Advisor CLI
//!
//! Entry point for the `advisor` command-line tool: ingest admissions
//! documents into a local chunk store and answer questions over them.

mod commands;
mod store;

use advisor_core::{config::AppConfig, logging, AppResult};
use clap::{Parser, Subcommand};
use commands::{AskCommand, IngestCommand, StatsCommand};
use std::path::PathBuf;

/// Retrieval-backed answers for university admissions questions.
#[derive(Parser, Debug)]
#[command(name = "advisor")]
#[command(about = "Retrieval-backed answers for university admissions questions", long_about = None)]
#[command(version)]
struct Cli {
    /// Workspace root holding the .advisor data directory
    #[arg(short, long, global = true, env = "ADVISOR_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Explicit config file path
    #[arg(short, long, global = true, env = "ADVISOR_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Shortcut for --log-level debug
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Turn off ANSI colors in log output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Generation provider (gemini, ollama)
    #[arg(short, long, global = true, env = "ADVISOR_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "ADVISOR_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a question from the ingested documents
    Ask(AskCommand),

    /// Ingest text documents into the chunk store
    Ingest(IngestCommand),

    /// Show chunk store statistics
    Stats(StatsCommand),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Ask(_) => "ask",
            Commands::Ingest(_) => "ingest",
            Commands::Stats(_) => "stats",
        }
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // CLI flags win over environment and config file values
    let config = AppConfig::load()?.with_overrides(
        cli.workspace,
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;
    tracing::info!("Admissions Advisor CLI starting");
    tracing::debug!(
        workspace = ?config.workspace,
        provider = %config.provider,
        model = %config.model,
        "Resolved configuration"
    );

    // Reject unknown providers and bad pipeline tunables before any work
    config.validate()?;
    config.ensure_advisor_dir()?;

    let _span = tracing::info_span!("command", name = cli.command.name()).entered();

    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Ingest(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(()) => tracing::info!("Command completed"),
        Err(e) => tracing::error!(error = %e, "Command failed"),
    }

    result
}
