use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::BTreeMap;

/// Row counts across the history and memory tables.
#[derive(Debug, Serialize)]
pub struct StoreStats {
    pub conversations: u64,
    pub messages: u64,
    pub memories: u64,
    /// Memory entries per category; uncategorized entries are keyed by `""`.
    pub by_category: BTreeMap<String, u64>,
    pub schema_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest_conversation: Option<i64>,
}

pub fn store_stats(conn: &Connection) -> Result<StoreStats> {
    let count = |table: &str| -> Result<u64> {
        let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(n as u64)
    };

    let mut by_category = BTreeMap::new();
    let mut stmt = conn.prepare(
        "SELECT COALESCE(category, ''), COUNT(*) FROM memory GROUP BY COALESCE(category, '')",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))?;
    for row in rows {
        let (category, n) = row?;
        by_category.insert(category, n as u64);
    }

    let newest_conversation: Option<i64> =
        conn.query_row("SELECT MAX(created_at) FROM conversations", [], |row| row.get(0))?;

    Ok(StoreStats {
        conversations: count("conversations")?,
        messages: count("messages")?,
        memories: count("memory")?,
        by_category,
        schema_version: crate::db::migrations::get_schema_version(conn)?,
        newest_conversation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_has_zero_counts() {
        let conn = crate::db::open_memory_database().unwrap();
        let stats = store_stats(&conn).unwrap();
        assert_eq!(stats.conversations, 0);
        assert_eq!(stats.messages, 0);
        assert_eq!(stats.memories, 0);
        assert!(stats.by_category.is_empty());
        assert!(stats.newest_conversation.is_none());
        assert_eq!(stats.schema_version, crate::db::migrations::CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn categories_are_grouped() {
        let conn = crate::db::open_memory_database().unwrap();
        conn.execute_batch(
            "INSERT INTO memory (content, category, importance, created_at) VALUES ('a', 'work', 5, 1);
             INSERT INTO memory (content, category, importance, created_at) VALUES ('b', 'work', 5, 2);
             INSERT INTO memory (content, category, importance, created_at) VALUES ('c', NULL, 5, 3);",
        )
        .unwrap();
        let stats = store_stats(&conn).unwrap();
        assert_eq!(stats.memories, 3);
        assert_eq!(stats.by_category.get("work"), Some(&2));
        assert_eq!(stats.by_category.get(""), Some(&1));
    }
}
