use anyhow::{bail, Result};
use std::sync::Arc;

use crate::config::HindsightConfig;
use crate::query::{Keywords, QueryEngine};
use crate::repository::SqliteRepository;
use crate::tools::resolve_limit;

/// Search long-term memory from the terminal.
pub fn search(config: &HindsightConfig, keywords: &[String], limit: Option<i64>) -> Result<()> {
    let Some(keywords) = Keywords::parse(keywords) else {
        bail!("at least one non-blank keyword is required");
    };

    let repo = SqliteRepository::open(config.resolved_db_path())?;
    let engine = QueryEngine::new(Arc::new(repo), config.limits.preview_chars);
    let limit = resolve_limit(limit, &config.limits);

    let response = engine.search_memory(&keywords, limit)?;

    if response.items.is_empty() {
        println!("No results found.");
        return Ok(());
    }

    println!("Found {} result(s)\n", response.items.len());

    for (i, entry) in response.items.iter().enumerate() {
        println!(
            "  {}. #{} [{}] (importance: {})",
            i + 1,
            entry.id,
            entry.category.as_deref().unwrap_or("-"),
            entry.importance,
        );
        println!("     {}", crate::query::keywords::preview(&entry.content, 120));
        println!();
    }

    Ok(())
}
