use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::resolve_limit;
use crate::config::LimitsConfig;
use crate::error::ToolError;
use crate::query::Operation;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchMemoryByCategoryParams {
    #[schemars(
        description = "Category to filter memory entries by, case-sensitive exact match (e.g. 'moltbook', 'work', 'personal')",
        length(min = 1)
    )]
    pub category: String,

    #[schemars(description = "Maximum number of entries to return (default: 50, max: 200)")]
    pub limit: Option<i64>,
}

impl SearchMemoryByCategoryParams {
    pub fn resolve(self, limits: &LimitsConfig) -> Result<Operation, ToolError> {
        if self.category.is_empty() {
            return Err(ToolError::invalid("category", "must not be empty"));
        }
        Ok(Operation::SearchMemoryByCategory {
            category: self.category,
            limit: resolve_limit(self.limit, limits),
        })
    }
}
