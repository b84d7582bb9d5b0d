//! SQLite-backed [`Repository`].
//!
//! One connection behind a mutex: every operation holds the lock for its whole
//! unit of work, so a reader never observes a half-applied insert or delete.

use anyhow::{anyhow, Result};
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

use super::types::{Conversation, MemoryEntry, Message, MessageHit, NewMemory};
use super::{conversations, memory, stats, Repository};

/// Name of the SQL function that lowercases text the same way keyword matching does.
const CASEFOLD_FN: &str = "hs_casefold";

pub struct SqliteRepository {
    conn: Mutex<Connection>,
}

impl SqliteRepository {
    /// Wrap an already-initialized connection (see [`crate::db`]).
    pub fn new(conn: Connection) -> Result<Self> {
        register_functions(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open (or create) the database file and wrap it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(crate::db::open_database(path)?)
    }

    /// Fresh, migrated, in-memory store.
    pub fn in_memory() -> Result<Self> {
        Self::new(crate::db::open_memory_database()?)
    }

    /// Row counts for the `stats` command.
    pub fn stats(&self) -> Result<stats::StoreStats> {
        self.with_conn(|conn| stats::store_stats(conn))
    }

    /// Run `f` with exclusive access to the connection.
    pub fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| anyhow!("db lock poisoned: {e}"))?;
        f(&mut conn)
    }
}

impl Repository for SqliteRepository {
    fn list_conversations(&self, limit: usize, offset: usize) -> Result<Vec<Conversation>> {
        self.with_conn(|conn| conversations::list_conversations(conn, limit, offset))
    }

    fn get_conversation(&self, id: &str) -> Result<Option<Conversation>> {
        self.with_conn(|conn| conversations::get_conversation(conn, id))
    }

    fn conversation_messages(&self, conversation_id: &str) -> Result<Vec<Message>> {
        self.with_conn(|conn| conversations::conversation_messages(conn, conversation_id))
    }

    fn get_message(&self, id: i64) -> Result<Option<Message>> {
        self.with_conn(|conn| conversations::get_message(conn, id))
    }

    fn search_messages(&self, keywords: &[String]) -> Result<Vec<MessageHit>> {
        self.with_conn(|conn| conversations::search_messages(conn, keywords))
    }

    fn search_conversation_titles(&self, keywords: &[String]) -> Result<Vec<Conversation>> {
        self.with_conn(|conn| conversations::search_conversation_titles(conn, keywords))
    }

    fn create_memory(&self, new: &NewMemory) -> Result<MemoryEntry> {
        self.with_conn(|conn| memory::create_memory(conn, new))
    }

    fn search_memory(&self, keywords: &[String]) -> Result<Vec<MemoryEntry>> {
        self.with_conn(|conn| memory::search_memory(conn, keywords))
    }

    fn search_memory_by_category(&self, category: &str) -> Result<Vec<MemoryEntry>> {
        self.with_conn(|conn| memory::search_memory_by_category(conn, category))
    }

    fn delete_memory(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| memory::delete_memory(conn, id))
    }
}

/// Register `hs_casefold(text)`. SQLite's own `lower()` and `LIKE` only fold ASCII,
/// which would miss matches the query engine accepts.
pub fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        CASEFOLD_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )?;
    Ok(())
}

/// `( instr(hs_casefold(col), ?1) > 0 OR ... )` across every column and keyword
/// placeholder `?1..=?keyword_count`.
pub(crate) fn any_keyword_clause(columns: &[&str], keyword_count: usize) -> String {
    let terms: Vec<String> = (1..=keyword_count)
        .flat_map(|param| {
            columns
                .iter()
                .map(move |col| format!("instr({CASEFOLD_FN}({col}), ?{param}) > 0"))
        })
        .collect();
    format!("({})", terms.join(" OR "))
}
