//! MCP `delete_memory` tool parameter definition.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::query::Operation;

/// Parameters for the `delete_memory` MCP tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DeleteMemoryParams {
    /// Deleting an id that does not exist (or no longer exists) fails with `not_found`.
    #[schemars(description = "The ID of the memory entry to remove")]
    pub memory_id: i64,
}

impl DeleteMemoryParams {
    pub fn resolve(self) -> Operation {
        Operation::DeleteMemory { id: self.memory_id }
    }
}
