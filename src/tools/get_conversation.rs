use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::query::Operation;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetConversationParams {
    #[schemars(description = "The unique identifier of the conversation to retrieve")]
    pub conversation_id: String,
}

impl GetConversationParams {
    pub fn resolve(self) -> Operation {
        Operation::GetConversation {
            id: self.conversation_id,
        }
    }
}
