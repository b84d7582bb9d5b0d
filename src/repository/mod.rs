//! Storage seam for conversation history and memory notes.
//!
//! The query engine talks to storage only through [`Repository`]. Keyword
//! methods receive keywords already trimmed and lowercased; they may return a
//! superset of the true matches (the query engine re-checks, ranks and trims),
//! but must never omit a row that contains a keyword.

pub mod conversations;
pub mod memory;
pub mod sqlite;
pub mod stats;
pub mod types;

use anyhow::Result;

pub use sqlite::SqliteRepository;
pub use types::{Conversation, MemoryEntry, Message, MessageHit, NewMemory, Role};

pub trait Repository: Send + Sync {
    /// Conversations, most recent first, after skipping `offset`.
    fn list_conversations(&self, limit: usize, offset: usize) -> Result<Vec<Conversation>>;

    fn get_conversation(&self, id: &str) -> Result<Option<Conversation>>;

    /// Every message of a conversation, oldest first.
    fn conversation_messages(&self, conversation_id: &str) -> Result<Vec<Message>>;

    fn get_message(&self, id: i64) -> Result<Option<Message>>;

    /// Messages whose content, or whose conversation's title, contains any keyword.
    fn search_messages(&self, keywords: &[String]) -> Result<Vec<MessageHit>>;

    /// Conversations whose title contains any keyword.
    fn search_conversation_titles(&self, keywords: &[String]) -> Result<Vec<Conversation>>;

    fn create_memory(&self, memory: &NewMemory) -> Result<MemoryEntry>;

    /// Memory entries whose content contains any keyword.
    fn search_memory(&self, keywords: &[String]) -> Result<Vec<MemoryEntry>>;

    /// Memory entries whose category equals `category` exactly.
    fn search_memory_by_category(&self, category: &str) -> Result<Vec<MemoryEntry>>;

    /// Returns `false` when no entry had this id.
    fn delete_memory(&self, id: i64) -> Result<bool>;
}
