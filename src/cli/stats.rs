use anyhow::Result;

use crate::config::HindsightConfig;
use crate::repository::SqliteRepository;

/// Display history and memory statistics in the terminal.
pub fn stats(config: &HindsightConfig) -> Result<()> {
    let db_path = config.resolved_db_path();
    let repo = SqliteRepository::open(&db_path)?;
    let stats = repo.stats()?;

    println!("Hindsight Statistics");
    println!("{}", "=".repeat(40));
    println!("  Database:            {}", db_path.display());
    println!("  Schema version:      {}", stats.schema_version);
    println!("  Conversations:       {}", stats.conversations);
    println!("  Messages:            {}", stats.messages);
    println!("  Memory entries:      {}", stats.memories);
    println!();

    if !stats.by_category.is_empty() {
        println!("By Category:");
        for (category, count) in &stats.by_category {
            let label = if category.is_empty() { "(none)" } else { category.as_str() };
            println!("  {:<20} {}", label, count);
        }
        println!();
    }

    if let Some(newest) = stats.newest_conversation.and_then(format_timestamp) {
        println!("Newest conversation:   {newest}");
    }

    Ok(())
}

fn format_timestamp(secs: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(secs, 0).map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}
