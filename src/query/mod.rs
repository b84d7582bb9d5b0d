//! Query engine: runs one resolved [`Operation`] against a [`Repository`].
//!
//! The repository narrows candidates; everything that decides what the client
//! sees happens here: keyword re-checking, hit counting, ordering (always ending
//! in an id tie-break so identical queries give identical output), limits and
//! preview truncation.

pub mod keywords;

use serde::Serialize;
use serde_json::Value;
use std::cmp::Reverse;
use std::sync::Arc;

use crate::error::ToolError;
use crate::repository::{Conversation, MemoryEntry, Message, NewMemory, Repository, Role};
use keywords::preview;
pub use keywords::Keywords;

/// A tool call with every optional field already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListConversations { limit: usize, offset: usize },
    SearchConversations { keywords: Keywords, limit: usize },
    SearchConversationTitles { keywords: Keywords, limit: usize },
    GetConversation { id: String },
    GetMessage { id: i64 },
    StoreMemory(NewMemory),
    SearchMemory { keywords: Keywords, limit: usize },
    SearchMemoryByCategory { category: String, limit: usize },
    DeleteMemory { id: i64 },
}

/// List payloads are always wrapped so metadata can be added beside `items`.
#[derive(Debug, Serialize)]
pub struct Items<T> {
    pub items: Vec<T>,
}

/// One message matched by `search_conversations`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageMatch {
    pub message_id: i64,
    pub conversation_id: String,
    pub conversation_title: String,
    pub role: Role,
    pub content_preview: String,
    pub created_at: i64,
    /// Distinct keywords found in the message content or conversation title.
    pub hits: usize,
}

/// A conversation with its full transcript.
#[derive(Debug, Serialize)]
pub struct ConversationDetail {
    #[serde(flatten)]
    pub conversation: Conversation,
    pub messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
pub struct DeleteOutcome {
    pub id: i64,
    pub deleted: bool,
}

pub struct QueryEngine {
    repo: Arc<dyn Repository>,
    preview_chars: usize,
}

impl QueryEngine {
    pub fn new(repo: Arc<dyn Repository>, preview_chars: usize) -> Self {
        Self { repo, preview_chars }
    }

    /// Execute `op` and serialize its payload.
    pub fn execute(&self, op: Operation) -> Result<Value, ToolError> {
        match op {
            Operation::ListConversations { limit, offset } => {
                to_payload(&self.list_conversations(limit, offset)?)
            }
            Operation::SearchConversations { keywords, limit } => {
                to_payload(&self.search_conversations(&keywords, limit)?)
            }
            Operation::SearchConversationTitles { keywords, limit } => {
                to_payload(&self.search_conversation_titles(&keywords, limit)?)
            }
            Operation::GetConversation { id } => to_payload(&self.get_conversation(&id)?),
            Operation::GetMessage { id } => to_payload(&self.get_message(id)?),
            Operation::StoreMemory(new) => to_payload(&self.store_memory(&new)?),
            Operation::SearchMemory { keywords, limit } => {
                to_payload(&self.search_memory(&keywords, limit)?)
            }
            Operation::SearchMemoryByCategory { category, limit } => {
                to_payload(&self.search_memory_by_category(&category, limit)?)
            }
            Operation::DeleteMemory { id } => to_payload(&self.delete_memory(id)?),
        }
    }

    pub fn list_conversations(&self, limit: usize, offset: usize) -> Result<Items<Conversation>, ToolError> {
        let mut items = self.repo.list_conversations(limit, offset)?;
        sort_recent_first(&mut items);
        items.truncate(limit);
        Ok(Items { items })
    }

    pub fn search_conversations(&self, keywords: &Keywords, limit: usize) -> Result<Items<MessageMatch>, ToolError> {
        let candidates = self.repo.search_messages(keywords.as_slice())?;

        let mut scored: Vec<(usize, _)> = candidates
            .into_iter()
            .filter_map(|hit| {
                let hits = keywords.hits(&[hit.message.content.as_str(), hit.conversation_title.as_str()]);
                (hits > 0).then_some((hits, hit))
            })
            .collect();

        scored.sort_by_key(|(hits, hit)| (Reverse(*hits), Reverse(hit.message.created_at), hit.message.id));
        scored.truncate(limit);

        let items = scored
            .into_iter()
            .map(|(hits, hit)| MessageMatch {
                message_id: hit.message.id,
                content_preview: preview(&hit.message.content, self.preview_chars),
                conversation_id: hit.message.conversation_id,
                conversation_title: hit.conversation_title,
                role: hit.message.role,
                created_at: hit.message.created_at,
                hits,
            })
            .collect();
        Ok(Items { items })
    }

    pub fn search_conversation_titles(&self, keywords: &Keywords, limit: usize) -> Result<Items<Conversation>, ToolError> {
        let mut items: Vec<Conversation> = self
            .repo
            .search_conversation_titles(keywords.as_slice())?
            .into_iter()
            .filter(|c| keywords.hits(&[c.title.as_str()]) > 0)
            .collect();
        sort_recent_first(&mut items);
        items.truncate(limit);
        Ok(Items { items })
    }

    pub fn get_conversation(&self, id: &str) -> Result<ConversationDetail, ToolError> {
        let conversation = self
            .repo
            .get_conversation(id)?
            .ok_or_else(|| ToolError::not_found("conversation", id))?;

        let mut messages = self.repo.conversation_messages(id)?;
        messages.sort_by_key(|m| (m.created_at, m.id));

        Ok(ConversationDetail {
            conversation,
            messages,
        })
    }

    pub fn get_message(&self, id: i64) -> Result<Message, ToolError> {
        self.repo
            .get_message(id)?
            .ok_or_else(|| ToolError::not_found("message", id))
    }

    pub fn store_memory(&self, new: &NewMemory) -> Result<MemoryEntry, ToolError> {
        let entry = self.repo.create_memory(new)?;
        tracing::info!(id = entry.id, category = ?entry.category, importance = entry.importance, "memory stored");
        Ok(entry)
    }

    pub fn search_memory(&self, keywords: &Keywords, limit: usize) -> Result<Items<MemoryEntry>, ToolError> {
        let mut items: Vec<MemoryEntry> = self
            .repo
            .search_memory(keywords.as_slice())?
            .into_iter()
            .filter(|m| keywords.hits(&[m.content.as_str()]) > 0)
            .collect();
        sort_by_importance(&mut items);
        items.truncate(limit);
        Ok(Items { items })
    }

    pub fn search_memory_by_category(&self, category: &str, limit: usize) -> Result<Items<MemoryEntry>, ToolError> {
        let mut items: Vec<MemoryEntry> = self
            .repo
            .search_memory_by_category(category)?
            .into_iter()
            .filter(|m| m.category.as_deref() == Some(category))
            .collect();
        sort_by_importance(&mut items);
        items.truncate(limit);
        Ok(Items { items })
    }

    /// Strict delete: an unknown (or already deleted) id is `NotFound`.
    pub fn delete_memory(&self, id: i64) -> Result<DeleteOutcome, ToolError> {
        if !self.repo.delete_memory(id)? {
            return Err(ToolError::not_found("memory", id));
        }
        tracing::info!(id, "memory deleted");
        Ok(DeleteOutcome { id, deleted: true })
    }
}

fn to_payload<T: Serialize>(value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|e| ToolError::Execution(e.into()))
}

/// Newest first; equal timestamps fall back to id ascending.
fn sort_recent_first(items: &mut [Conversation]) {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
}

/// Importance desc, then newest first, then id ascending.
fn sort_by_importance(items: &mut [MemoryEntry]) {
    items.sort_by_key(|m| (Reverse(m.importance), Reverse(m.created_at), m.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::SqliteRepository;

    fn engine() -> (Arc<SqliteRepository>, QueryEngine) {
        let repo = Arc::new(SqliteRepository::in_memory().unwrap());
        let engine = QueryEngine::new(repo.clone(), 200);
        (repo, engine)
    }

    fn seed_memory(repo: &SqliteRepository, content: &str, category: Option<&str>, importance: i64, created_at: i64) -> i64 {
        repo.with_conn(|conn| {
            conn.execute(
                "INSERT INTO memory (content, category, importance, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
                rusqlite::params![content, category, importance, created_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .unwrap()
    }

    #[test]
    fn memory_search_orders_by_importance_then_recency_then_id() {
        let (repo, engine) = engine();
        let low = seed_memory(&repo, "rust tip", None, 2, 300);
        let old = seed_memory(&repo, "rust fact", None, 8, 100);
        let new = seed_memory(&repo, "rust news", None, 8, 200);
        let twin = seed_memory(&repo, "rust news again", None, 8, 200);

        let kw = Keywords::parse(&["RUST"]).unwrap();
        let ids: Vec<i64> = engine.search_memory(&kw, 50).unwrap().items.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![new, twin, old, low]);
    }

    #[test]
    fn memory_search_applies_limit() {
        let (repo, engine) = engine();
        for i in 0..5 {
            seed_memory(&repo, &format!("note {i}"), None, 5, i);
        }
        let kw = Keywords::parse(&["note"]).unwrap();
        assert_eq!(engine.search_memory(&kw, 3).unwrap().items.len(), 3);
    }

    #[test]
    fn category_search_is_case_sensitive() {
        let (repo, engine) = engine();
        seed_memory(&repo, "a", Some("Work"), 5, 1);
        let hit = seed_memory(&repo, "b", Some("work"), 5, 2);

        let items = engine.search_memory_by_category("work", 50).unwrap().items;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, hit);
    }

    #[test]
    fn delete_twice_is_not_found() {
        let (repo, engine) = engine();
        let id = seed_memory(&repo, "temp", None, 5, 1);
        assert!(engine.delete_memory(id).unwrap().deleted);
        assert!(matches!(engine.delete_memory(id), Err(ToolError::NotFound { kind: "memory", .. })));
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let (_repo, engine) = engine();
        assert!(matches!(engine.get_conversation("nope"), Err(ToolError::NotFound { .. })));
        assert!(matches!(engine.get_message(42), Err(ToolError::NotFound { .. })));
    }

    #[test]
    fn execute_wraps_lists_in_items() {
        let (_repo, engine) = engine();
        let payload = engine
            .execute(Operation::ListConversations { limit: 10, offset: 0 })
            .unwrap();
        assert!(payload["items"].is_array());
    }
}
