#![allow(dead_code)]

use hindsight::config::LimitsConfig;
use hindsight::protocol::ProtocolEngine;
use hindsight::repository::SqliteRepository;
use hindsight::server::build_engine;
use serde_json::{json, Value};
use std::sync::Arc;

/// Fresh in-memory store with schema and migrations applied.
pub fn test_repo() -> Arc<SqliteRepository> {
    Arc::new(SqliteRepository::in_memory().unwrap())
}

/// Insert a conversation row directly, the way the chat application would.
pub fn seed_conversation(repo: &SqliteRepository, id: &str, title: &str, created_at: i64) {
    repo.with_conn(|conn| {
        conn.execute(
            "INSERT INTO conversations (id, title, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![id, title, created_at],
        )?;
        Ok(())
    })
    .unwrap();
}

/// Insert a message row directly. Returns the message id.
pub fn seed_message(repo: &SqliteRepository, conversation_id: &str, role: &str, content: &str, created_at: i64) -> i64 {
    repo.with_conn(|conn| {
        conn.execute(
            "INSERT INTO messages (conversation_id, role, content, created_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![conversation_id, role, content, created_at],
        )?;
        Ok(conn.last_insert_rowid())
    })
    .unwrap()
}

/// Protocol engine over `repo` with default limits, not yet initialized.
pub fn engine(repo: Arc<SqliteRepository>) -> ProtocolEngine {
    build_engine(repo, &LimitsConfig::default())
}

/// Protocol engine that has completed the initialize handshake.
pub async fn ready_engine(repo: Arc<SqliteRepository>) -> ProtocolEngine {
    let mut engine = engine(repo);
    request(&mut engine, 0, "initialize", json!({ "protocolVersion": "2025-06-18" })).await;
    assert!(engine
        .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await
        .is_none());
    engine
}

/// Send one request and parse the response line.
pub async fn request(engine: &mut ProtocolEngine, id: i64, method: &str, params: Value) -> Value {
    let line = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params }).to_string();
    let out = engine.handle_line(&line).await.expect("request must be answered");
    serde_json::from_str(&out).unwrap()
}

/// Call a tool and return `(is_error, decoded text payload)`.
pub async fn call_tool(engine: &mut ProtocolEngine, name: &str, arguments: Value) -> (bool, Value) {
    let response = request(engine, 99, "tools/call", json!({ "name": name, "arguments": arguments })).await;
    let result = &response["result"];
    let text = result["content"][0]["text"].as_str().expect("text content");
    (result["isError"] == true, serde_json::from_str(text).unwrap())
}
