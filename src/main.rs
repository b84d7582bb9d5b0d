use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use hindsight::config::HindsightConfig;
use hindsight::{cli, server};

#[derive(Parser)]
#[command(name = "hindsight", version, about = "Conversation history and memory MCP server")]
struct Cli {
    /// Config file to use instead of ~/.hindsight/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the MCP server (stdio transport). Used when no command is given.
    Serve,
    /// Search long-term memory by keywords
    Search {
        #[arg(required = true)]
        keywords: Vec<String>,
        /// Maximum number of results
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Show conversation, message and memory counts
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HindsightConfig::load_from(path)?,
        None => HindsightConfig::load()?,
    };

    // Log to stderr so stdout stays clean for MCP JSON-RPC.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => server::serve_stdio(config).await?,
        Command::Search { keywords, limit } => cli::search(&config, &keywords, limit)?,
        Command::Stats => cli::stats(&config)?,
    }

    Ok(())
}
