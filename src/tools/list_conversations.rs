//! MCP `list_conversations` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::resolve_limit;
use crate::config::LimitsConfig;
use crate::query::Operation;

/// Parameters for the `list_conversations` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListConversationsParams {
    /// Page size. Absent or non-positive uses the default; large values are capped.
    #[schemars(description = "Maximum number of conversations to return (default: 50, max: 200)")]
    pub limit: Option<i64>,

    /// Conversations to skip, counted from the most recent.
    #[schemars(description = "Number of conversations to skip (default: 0)")]
    pub offset: Option<u32>,
}

impl ListConversationsParams {
    pub fn resolve(self, limits: &LimitsConfig) -> Operation {
        Operation::ListConversations {
            limit: resolve_limit(self.limit, limits),
            offset: self.offset.unwrap_or(0) as usize,
        }
    }
}
