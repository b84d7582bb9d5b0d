//! MCP server initialization for the stdio transport.
//!
//! [`serve_stdio`] wires up the database, query engine and tool dispatcher into
//! a [`ProtocolEngine`] and runs it until the client closes stdin.

use anyhow::Result;
use std::sync::Arc;

use crate::config::{HindsightConfig, LimitsConfig};
use crate::protocol::ProtocolEngine;
use crate::query::QueryEngine;
use crate::repository::{Repository, SqliteRepository};
use crate::tools::ToolDispatcher;

/// Build a session engine over any repository.
pub fn build_engine(repo: Arc<dyn Repository>, limits: &LimitsConfig) -> ProtocolEngine {
    let query = Arc::new(QueryEngine::new(repo, limits.preview_chars));
    ProtocolEngine::new(ToolDispatcher::new(query, limits.clone()))
}

/// Open the configured database and build an engine over it.
pub fn setup(config: &HindsightConfig) -> Result<ProtocolEngine> {
    let db_path = config.resolved_db_path();
    let repo = SqliteRepository::open(&db_path)?;
    tracing::info!(db = %db_path.display(), "database ready");
    Ok(build_engine(Arc::new(repo), &config.limits))
}

/// Start the MCP server over stdio transport.
pub async fn serve_stdio(config: HindsightConfig) -> Result<()> {
    tracing::info!("starting Hindsight MCP server on stdio");

    let mut engine = setup(&config)?;
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tracing::info!("MCP server running, waiting for client");
    engine.run(stdin, stdout).await?;
    tracing::info!("MCP server shut down");

    Ok(())
}
