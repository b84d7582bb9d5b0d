//! Conversation history and long-term memory for AI assistants, over MCP.
//!
//! Hindsight is an [MCP](https://modelcontextprotocol.io/) server that speaks
//! line-delimited JSON-RPC 2.0 on stdio. It exposes a chat application's stored
//! conversation history (read-only) plus a small long-term memory store through
//! nine tools:
//!
//! | Tool | Purpose |
//! |------|---------|
//! | `search_conversations` | Keyword search over message content and titles |
//! | `get_conversation` | Full transcript of one conversation |
//! | `search_conversation_titles` | Keyword search over titles only |
//! | `list_conversations` | Most recent conversations |
//! | `get_message` | One message by id |
//! | `store_memory` | Save a fact with category and importance |
//! | `search_memory` | Keyword search over memory |
//! | `search_memory_by_category` | Exact category lookup |
//! | `delete_memory` | Remove a memory entry |
//!
//! # Modules
//!
//! - [`config`]: TOML configuration with environment overrides
//! - [`db`]: SQLite setup, schema and migrations
//! - [`repository`]: the storage trait and its SQLite implementation
//! - [`query`]: matching, ordering and limits for every operation
//! - [`tools`]: tool registry, argument validation and dispatch
//! - [`protocol`]: JSON-RPC framing and the MCP handshake

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod protocol;
pub mod query;
pub mod repository;
pub mod server;
pub mod tools;
