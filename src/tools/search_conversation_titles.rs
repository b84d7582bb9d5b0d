//! MCP `search_conversation_titles` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{parse_keywords, resolve_limit};
use crate::config::LimitsConfig;
use crate::error::ToolError;
use crate::query::Operation;

/// Parameters for the `search_conversation_titles` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchConversationTitlesParams {
    #[schemars(
        description = "Keywords to find in conversation titles (OR semantics, case-insensitive)",
        length(min = 1)
    )]
    pub keywords: Vec<String>,

    #[schemars(description = "Maximum number of conversations to return (default: 50, max: 200)")]
    pub limit: Option<i64>,
}

impl SearchConversationTitlesParams {
    pub fn resolve(self, limits: &LimitsConfig) -> Result<Operation, ToolError> {
        Ok(Operation::SearchConversationTitles {
            keywords: parse_keywords(&self.keywords)?,
            limit: resolve_limit(self.limit, limits),
        })
    }
}
