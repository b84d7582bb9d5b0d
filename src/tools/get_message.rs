use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::query::Operation;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetMessageParams {
    #[schemars(description = "The unique identifier of the message to retrieve")]
    pub message_id: i64,
}

impl GetMessageParams {
    pub fn resolve(self) -> Operation {
        Operation::GetMessage {
            id: self.message_id,
        }
    }
}
