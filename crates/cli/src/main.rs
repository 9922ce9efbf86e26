//! Textchunk CLI
//!
//! Main entry point for the textchunk command-line tool.
//! Splits documents into bounded, overlapping chunks for downstream
//! embedding and retrieval pipelines.

mod commands;

use clap::{Parser, Subcommand};
use commands::{BatchCommand, ChunkCommand};
use textchunk_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// Textchunk CLI - document chunking for retrieval pipelines
#[derive(Parser, Debug)]
#[command(name = "textchunk")]
#[command(about = "Split documents into bounded, overlapping chunks", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "TEXTCHUNK_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "TEXTCHUNK_CONFIG")]
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

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Chunk a single file
    Chunk(ChunkCommand),

    /// Chunk every matching file in a directory
    Batch(BatchCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::debug!("Workspace: {:?}", config.workspace);

    let command_name = match &cli.command {
        Commands::Chunk(_) => "chunk",
        Commands::Batch(_) => "batch",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Chunk(cmd) => cmd.execute(&config).await,
        Commands::Batch(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
