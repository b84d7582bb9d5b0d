//! Tool registry and per-tool argument types.
//!
//! [`ToolName`] is the closed catalog. Each tool's input schema is generated
//! from its parameter struct, so the schema advertised in `tools/list` is the
//! one [`schema::validate`] enforces before [`ToolCall::decode`] runs.

pub mod delete_memory;
pub mod dispatch;
pub mod get_conversation;
pub mod get_message;
pub mod list_conversations;
pub mod schema;
pub mod search_conversation_titles;
pub mod search_conversations;
pub mod search_memory;
pub mod search_memory_by_category;
pub mod store_memory;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::LazyLock;

use crate::config::LimitsConfig;
use crate::error::ToolError;
use crate::query::{Keywords, Operation};
use delete_memory::DeleteMemoryParams;
use get_conversation::GetConversationParams;
use get_message::GetMessageParams;
use list_conversations::ListConversationsParams;
use search_conversation_titles::SearchConversationTitlesParams;
use search_conversations::SearchConversationsParams;
use search_memory::SearchMemoryParams;
use search_memory_by_category::SearchMemoryByCategoryParams;
use store_memory::StoreMemoryParams;

pub use dispatch::ToolDispatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    SearchConversations,
    GetConversation,
    SearchConversationTitles,
    ListConversations,
    GetMessage,
    StoreMemory,
    SearchMemory,
    SearchMemoryByCategory,
    DeleteMemory,
}

impl ToolName {
    /// Registry order, which is also the `tools/list` order.
    pub const ALL: [ToolName; 9] = [
        Self::SearchConversations,
        Self::GetConversation,
        Self::SearchConversationTitles,
        Self::ListConversations,
        Self::GetMessage,
        Self::StoreMemory,
        Self::SearchMemory,
        Self::SearchMemoryByCategory,
        Self::DeleteMemory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SearchConversations => "search_conversations",
            Self::GetConversation => "get_conversation",
            Self::SearchConversationTitles => "search_conversation_titles",
            Self::ListConversations => "list_conversations",
            Self::GetMessage => "get_message",
            Self::StoreMemory => "store_memory",
            Self::SearchMemory => "search_memory",
            Self::SearchMemoryByCategory => "search_memory_by_category",
            Self::DeleteMemory => "delete_memory",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::SearchConversations => {
                "Search across all past conversations with the user. Returns individual messages whose \
                 content or conversation title contains any of the keywords (case-insensitive), ranked \
                 by how many keywords matched and then by recency, with a short content preview."
            }
            Self::GetConversation => {
                "Retrieve a complete conversation thread from past conversations with the user, \
                 including all messages in chronological order. Fails with not_found for unknown ids."
            }
            Self::SearchConversationTitles => {
                "Search conversation titles from past conversations with the user. Useful when you \
                 remember the topic but not the conversation id. Most recent first."
            }
            Self::ListConversations => {
                "List past conversations with the user, most recent first, with their message counts."
            }
            Self::GetMessage => {
                "Retrieve a specific message from past conversations by its message id, including \
                 role, content and any tool metadata. Fails with not_found for unknown ids."
            }
            Self::StoreMemory => {
                "Store a fact or piece of information in long-term memory, optionally tagged with a \
                 category and an importance from 1 to 10. Returns the stored entry with its id."
            }
            Self::SearchMemory => {
                "Search long-term memory for entries containing any of the keywords \
                 (case-insensitive). Most important entries first, then most recent."
            }
            Self::SearchMemoryByCategory => {
                "List long-term memory entries whose category exactly matches (case-sensitive). \
                 Most important entries first, then most recent."
            }
            Self::DeleteMemory => {
                "Remove a long-term memory entry by id. Deleting an id that does not exist, \
                 including one already deleted, fails with not_found."
            }
        }
    }

    /// JSON Schema for this tool's `arguments`.
    pub fn input_schema(&self) -> &'static Value {
        &registry_entry(*self).input_schema
    }

    fn generate_schema(&self) -> Value {
        match self {
            Self::SearchConversations => schema_of::<SearchConversationsParams>(),
            Self::GetConversation => schema_of::<GetConversationParams>(),
            Self::SearchConversationTitles => schema_of::<SearchConversationTitlesParams>(),
            Self::ListConversations => schema_of::<ListConversationsParams>(),
            Self::GetMessage => schema_of::<GetMessageParams>(),
            Self::StoreMemory => schema_of::<StoreMemoryParams>(),
            Self::SearchMemory => schema_of::<SearchMemoryParams>(),
            Self::SearchMemoryByCategory => schema_of::<SearchMemoryByCategoryParams>(),
            Self::DeleteMemory => schema_of::<DeleteMemoryParams>(),
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ToolName {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| ToolError::ToolNotFound(s.to_string()))
    }
}

/// A registry entry as advertised by `tools/list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

static REGISTRY: LazyLock<Vec<ToolSpec>> = LazyLock::new(|| {
    ToolName::ALL
        .iter()
        .map(|tool| ToolSpec {
            name: tool.as_str(),
            description: tool.description(),
            input_schema: tool.generate_schema(),
        })
        .collect()
});

/// Every tool, in registry order.
pub fn registry() -> &'static [ToolSpec] {
    &REGISTRY
}

fn registry_entry(tool: ToolName) -> &'static ToolSpec {
    // ALL and REGISTRY share an order, so the position is the index.
    let index = ToolName::ALL.iter().position(|t| *t == tool).unwrap_or_default();
    &REGISTRY[index]
}

fn schema_of<T: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(T)).unwrap_or_else(|_| json!({ "type": "object" }))
}

/// Decoded arguments, one variant per tool.
#[derive(Debug)]
pub enum ToolCall {
    SearchConversations(SearchConversationsParams),
    GetConversation(GetConversationParams),
    SearchConversationTitles(SearchConversationTitlesParams),
    ListConversations(ListConversationsParams),
    GetMessage(GetMessageParams),
    StoreMemory(StoreMemoryParams),
    SearchMemory(SearchMemoryParams),
    SearchMemoryByCategory(SearchMemoryByCategoryParams),
    DeleteMemory(DeleteMemoryParams),
}

impl ToolCall {
    /// Decode already-validated `arguments` into the variant for `tool`.
    pub fn decode(tool: ToolName, arguments: Value) -> Result<Self, ToolError> {
        Ok(match tool {
            ToolName::SearchConversations => Self::SearchConversations(decode_as(arguments)?),
            ToolName::GetConversation => Self::GetConversation(decode_as(arguments)?),
            ToolName::SearchConversationTitles => Self::SearchConversationTitles(decode_as(arguments)?),
            ToolName::ListConversations => Self::ListConversations(decode_as(arguments)?),
            ToolName::GetMessage => Self::GetMessage(decode_as(arguments)?),
            ToolName::StoreMemory => Self::StoreMemory(decode_as(arguments)?),
            ToolName::SearchMemory => Self::SearchMemory(decode_as(arguments)?),
            ToolName::SearchMemoryByCategory => Self::SearchMemoryByCategory(decode_as(arguments)?),
            ToolName::DeleteMemory => Self::DeleteMemory(decode_as(arguments)?),
        })
    }

    /// Apply defaults and semantic checks, producing the operation the query engine runs.
    pub fn resolve(self, limits: &LimitsConfig) -> Result<Operation, ToolError> {
        match self {
            Self::SearchConversations(p) => p.resolve(limits),
            Self::GetConversation(p) => Ok(p.resolve()),
            Self::SearchConversationTitles(p) => p.resolve(limits),
            Self::ListConversations(p) => Ok(p.resolve(limits)),
            Self::GetMessage(p) => Ok(p.resolve()),
            Self::StoreMemory(p) => p.resolve(limits),
            Self::SearchMemory(p) => p.resolve(limits),
            Self::SearchMemoryByCategory(p) => p.resolve(limits),
            Self::DeleteMemory(p) => Ok(p.resolve()),
        }
    }
}

fn decode_as<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|e| ToolError::invalid("arguments", e.to_string()))
}

/// Absent or non-positive → default; above the maximum → clamped.
pub(crate) fn resolve_limit(limit: Option<i64>, limits: &LimitsConfig) -> usize {
    match limit {
        Some(n) if n > 0 => usize::try_from(n).unwrap_or(usize::MAX).min(limits.max_limit),
        _ => limits.default_limit,
    }
}

/// `limit` never rejects a call: integers beyond `i64` saturate and anything
/// else that is not an integer is dropped, so [`resolve_limit`] sees it as absent.
pub(crate) fn normalize_limit(arguments: &mut Value) {
    let Some(args) = arguments.as_object_mut() else {
        return;
    };
    let normalized = match args.get("limit") {
        None | Some(Value::Null) => return,
        Some(Value::Number(n)) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(_), _, _) => return,
            (None, Some(_), _) => Some(i64::MAX),
            (None, None, Some(f)) if f.is_finite() && f.fract() == 0.0 => Some(f as i64),
            _ => None,
        },
        Some(_) => None,
    };

    match normalized {
        Some(limit) => {
            args.insert("limit".into(), Value::from(limit));
        }
        None => {
            tracing::debug!(limit = %args["limit"], "ignoring non-integer limit");
            args.remove("limit");
        }
    }
}

pub(crate) fn parse_keywords(raw: &[String]) -> Result<Keywords, ToolError> {
    Keywords::parse(raw).ok_or_else(|| ToolError::invalid("keywords", "must contain at least one non-blank keyword"))
}
