//! SQL DDL for the history and memory tables.
//!
//! `conversations` and `messages` belong to the chat application that records
//! the history; they are only created here so that a fresh database is usable.
//! `memory` is owned by this server. All DDL uses `IF NOT EXISTS`, so opening a
//! database the chat application already populated leaves its rows untouched.

use rusqlite::Connection;

/// Version-1 layout. Later columns are added by [`super::migrations`].
const SCHEMA_SQL: &str = r#"
-- Conversation history (written by the chat application)
CREATE TABLE IF NOT EXISTS conversations (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL,
    title_generated INTEGER NOT NULL DEFAULT 0,
    profile_name TEXT
);

CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    conversation_id TEXT NOT NULL REFERENCES conversations(id) ON DELETE CASCADE,
    role TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL,
    tool_calls TEXT,
    tool_call_id TEXT,
    tool_name TEXT,
    tool_status TEXT,
    tool_params_json TEXT,
    tool_result_json TEXT,
    reasoning_content TEXT
);

CREATE INDEX IF NOT EXISTS idx_messages_conversation ON messages(conversation_id);
CREATE INDEX IF NOT EXISTS idx_conversations_created ON conversations(created_at);

-- Curated memory notes
CREATE TABLE IF NOT EXISTS memory (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT NOT NULL,
    category TEXT,
    importance INTEGER DEFAULT 5,
    created_at INTEGER
);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    // Set initial schema version if not already present
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}
