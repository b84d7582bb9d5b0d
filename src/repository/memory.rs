//! Write and read paths for the `memory` table.
//!
//! Inserts and deletes run inside a transaction; ids come from SQLite's
//! `AUTOINCREMENT`, so a deleted id is never handed out again.

use anyhow::Result;
use rusqlite::{params, params_from_iter, Connection, Row};

use super::sqlite::any_keyword_clause;
use super::types::{MemoryEntry, NewMemory};

const MEMORY_COLUMNS: &str = "id, content, category, COALESCE(importance, 5), \
     COALESCE(created_at, 0), COALESCE(updated_at, created_at, 0)";

const MEMORY_ORDER: &str = "ORDER BY COALESCE(importance, 5) DESC, created_at DESC, id ASC";

fn memory_from_row(row: &Row<'_>) -> rusqlite::Result<MemoryEntry> {
    Ok(MemoryEntry {
        id: row.get(0)?,
        content: row.get(1)?,
        category: row.get(2)?,
        importance: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Insert a memory entry stamped with the current time and return it with its new id.
pub fn create_memory(conn: &mut Connection, memory: &NewMemory) -> Result<MemoryEntry> {
    let now = chrono::Utc::now().timestamp();
    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO memory (content, category, importance, created_at, updated_at) \
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![memory.content, memory.category, memory.importance, now],
    )?;
    let id = tx.last_insert_rowid();

    tx.commit()?;

    Ok(MemoryEntry {
        id,
        content: memory.content.clone(),
        category: memory.category.clone(),
        importance: memory.importance,
        created_at: now,
        updated_at: now,
    })
}

/// Entries whose content contains any of the (lowercased) keywords.
pub fn search_memory(conn: &Connection, keywords: &[String]) -> Result<Vec<MemoryEntry>> {
    if keywords.is_empty() {
        return Ok(Vec::new());
    }

    let filter = any_keyword_clause(&["content"], keywords.len());
    let sql = format!("SELECT {MEMORY_COLUMNS} FROM memory WHERE {filter} {MEMORY_ORDER}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(keywords.iter()), memory_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Entries tagged with exactly `category` (case-sensitive).
pub fn search_memory_by_category(conn: &Connection, category: &str) -> Result<Vec<MemoryEntry>> {
    let sql = format!("SELECT {MEMORY_COLUMNS} FROM memory WHERE category = ?1 {MEMORY_ORDER}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![category], memory_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Delete one entry. Returns whether a row was removed.
pub fn delete_memory(conn: &mut Connection, id: i64) -> Result<bool> {
    let tx = conn.transaction()?;
    let removed = tx.execute("DELETE FROM memory WHERE id = ?1", params![id])?;
    tx.commit()?;
    Ok(removed > 0)
}
