//! MCP `search_memory` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{parse_keywords, resolve_limit};
use crate::config::LimitsConfig;
use crate::error::ToolError;
use crate::query::Operation;

/// Parameters for the `search_memory` MCP tool.
///
/// An empty keyword list is rejected rather than treated as "match everything".
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchMemoryParams {
    #[schemars(
        description = "Keywords to search in memory (OR semantics, case-insensitive)",
        length(min = 1)
    )]
    pub keywords: Vec<String>,

    #[schemars(description = "Maximum number of entries to return (default: 50, max: 200)")]
    pub limit: Option<i64>,
}

impl SearchMemoryParams {
    pub fn resolve(self, limits: &LimitsConfig) -> Result<Operation, ToolError> {
        Ok(Operation::SearchMemory {
            keywords: parse_keywords(&self.keywords)?,
            limit: resolve_limit(self.limit, limits),
        })
    }
}
