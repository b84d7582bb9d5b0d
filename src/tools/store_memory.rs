//! MCP `store_memory` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::LimitsConfig;
use crate::error::ToolError;
use crate::query::Operation;
use crate::repository::NewMemory;

/// Inclusive importance scale.
pub const IMPORTANCE_RANGE: std::ops::RangeInclusive<i64> = 1..=10;

/// Parameters for the `store_memory` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StoreMemoryParams {
    #[schemars(description = "The fact or information to remember", length(min = 1))]
    pub content: String,

    /// Exact-match label; an empty string means no category.
    #[schemars(description = "A tag for grouping, matched exactly (e.g. 'workflow', 'crate-info')")]
    pub category: Option<String>,

    #[schemars(description = "Priority score 1-10 (default: 5)", range(min = 1, max = 10))]
    pub importance: Option<i64>,
}

impl StoreMemoryParams {
    pub fn resolve(self, limits: &LimitsConfig) -> Result<Operation, ToolError> {
        let content = self.content.trim();
        if content.is_empty() {
            return Err(ToolError::invalid("content", "must not be empty"));
        }

        let importance = self.importance.unwrap_or(limits.default_importance);
        if !IMPORTANCE_RANGE.contains(&importance) {
            return Err(ToolError::invalid(
                "importance",
                format!(
                    "must be between {} and {}",
                    IMPORTANCE_RANGE.start(),
                    IMPORTANCE_RANGE.end()
                ),
            ));
        }

        Ok(Operation::StoreMemory(NewMemory {
            content: content.to_string(),
            category: self.category.filter(|c| !c.is_empty()),
            importance,
        }))
    }
}
