//! Snowdesk
//!
//! Question answering for Alaska snow services: FAQ retrieval plus live NWS
//! forecasts behind a small HTTP API.

mod commands;
mod router;
mod state;

use clap::{Parser, Subcommand};
use commands::{AskCommand, LogsCommand, ServeCommand};
use snowdesk_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Snowdesk - Alaska snow services question answering
#[derive(Parser, Debug)]
#[command(name = "snowdesk")]
#[command(about = "Alaska snow services question answering", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, env = "SNOWDESK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Directory holding document collections
    #[arg(long, global = true, env = "SNOWDESK_CORPUS_ROOT")]
    corpus_root: Option<PathBuf>,

    /// Collection to load from the corpus root
    #[arg(long, global = true, env = "SNOWDESK_COLLECTION")]
    collection: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve(ServeCommand),

    /// Ask a single question
    Ask(AskCommand),

    /// Show recent interactions
    Logs(LogsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.corpus_root,
        cli.collection,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("Snowdesk starting");
    tracing::debug!("Config file: {:?}", config.config_file);
    tracing::debug!("Corpus: {:?} / {}", config.corpus.root, config.corpus.collection);

    config.validate()?;

    let command_name = match &cli.command {
        Commands::Serve(_) => "serve",
        Commands::Ask(_) => "ask",
        Commands::Logs(_) => "logs",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Serve(cmd) => cmd.execute(&config).await,
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Logs(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
