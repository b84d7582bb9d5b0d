//! MCP `search_conversations` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{parse_keywords, resolve_limit};
use crate::config::LimitsConfig;
use crate::error::ToolError;
use crate::query::Operation;

/// Parameters for the `search_conversations` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchConversationsParams {
    /// Matched case-insensitively against message content and conversation titles.
    #[schemars(
        description = "Keywords to search in conversation messages and titles (OR semantics, case-insensitive)",
        length(min = 1)
    )]
    pub keywords: Vec<String>,

    #[schemars(description = "Maximum number of messages to return (default: 50, max: 200)")]
    pub limit: Option<i64>,
}

impl SearchConversationsParams {
    pub fn resolve(self, limits: &LimitsConfig) -> Result<Operation, ToolError> {
        Ok(Operation::SearchConversations {
            keywords: parse_keywords(&self.keywords)?,
            limit: resolve_limit(self.limit, limits),
        })
    }
}
