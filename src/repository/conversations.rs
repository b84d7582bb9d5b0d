//! Read-only queries over the chat application's `conversations` and `messages` tables.

use anyhow::Result;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use super::sqlite::any_keyword_clause;
use super::types::{Conversation, Message, MessageHit};

const CONVERSATION_SELECT: &str = r#"
SELECT c.id, COALESCE(c.title, ''), COALESCE(c.created_at, 0), c.profile_name, COUNT(m.id)
FROM conversations c
LEFT JOIN messages m ON m.conversation_id = c.id
"#;

const MESSAGE_COLUMNS: &str = "m.id, m.conversation_id, m.role, COALESCE(m.content, ''), \
     COALESCE(m.created_at, 0), m.tool_name, m.tool_call_id, m.tool_status, m.reasoning_content";

fn conversation_from_row(row: &Row<'_>) -> rusqlite::Result<Conversation> {
    Ok(Conversation {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: row.get(2)?,
        profile_name: row.get(3)?,
        message_count: row.get(4)?,
    })
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<Message> {
    Ok(Message {
        id: row.get(0)?,
        conversation_id: row.get(1)?,
        role: row.get(2)?,
        content: row.get(3)?,
        created_at: row.get(4)?,
        tool_name: row.get(5)?,
        tool_call_id: row.get(6)?,
        tool_status: row.get(7)?,
        reasoning_content: row.get(8)?,
    })
}

pub fn list_conversations(conn: &Connection, limit: usize, offset: usize) -> Result<Vec<Conversation>> {
    let sql = format!(
        "{CONVERSATION_SELECT} GROUP BY c.id ORDER BY c.created_at DESC, c.id ASC LIMIT ?1 OFFSET ?2"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![limit as i64, offset as i64], conversation_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn get_conversation(conn: &Connection, id: &str) -> Result<Option<Conversation>> {
    let sql = format!("{CONVERSATION_SELECT} WHERE c.id = ?1 GROUP BY c.id");
    let conversation = conn
        .query_row(&sql, params![id], conversation_from_row)
        .optional()?;
    Ok(conversation)
}

pub fn conversation_messages(conn: &Connection, conversation_id: &str) -> Result<Vec<Message>> {
    let sql = format!(
        "SELECT {MESSAGE_COLUMNS} FROM messages m WHERE m.conversation_id = ?1 \
         ORDER BY m.created_at ASC, m.id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![conversation_id], message_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn get_message(conn: &Connection, id: i64) -> Result<Option<Message>> {
    let sql = format!("SELECT {MESSAGE_COLUMNS} FROM messages m WHERE m.id = ?1");
    let message = conn.query_row(&sql, params![id], message_from_row).optional()?;
    Ok(message)
}

/// Messages whose content or conversation title contains any of the (lowercased) keywords.
pub fn search_messages(conn: &Connection, keywords: &[String]) -> Result<Vec<MessageHit>> {
    if keywords.is_empty() {
        return Ok(Vec::new());
    }

    let filter = any_keyword_clause(&["m.content", "c.title"], keywords.len());
    let sql = format!(
        "SELECT {MESSAGE_COLUMNS}, COALESCE(c.title, '') \
         FROM messages m JOIN conversations c ON c.id = m.conversation_id \
         WHERE {filter}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(keywords.iter()), |row| {
            Ok(MessageHit {
                message: message_from_row(row)?,
                conversation_title: row.get(9)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Conversations whose title contains any of the (lowercased) keywords.
pub fn search_conversation_titles(conn: &Connection, keywords: &[String]) -> Result<Vec<Conversation>> {
    if keywords.is_empty() {
        return Ok(Vec::new());
    }

    let filter = any_keyword_clause(&["c.title"], keywords.len());
    let sql = format!("{CONVERSATION_SELECT} WHERE {filter} GROUP BY c.id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(keywords.iter()), conversation_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
