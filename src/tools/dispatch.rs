//! Runs `tools/call` requests: name lookup, validation, decoding and execution.

use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, error};

use super::{normalize_limit, schema, ToolCall, ToolName};
use crate::config::LimitsConfig;
use crate::error::ToolError;
use crate::query::{Operation, QueryEngine};

#[derive(Clone)]
pub struct ToolDispatcher {
    engine: Arc<QueryEngine>,
    limits: LimitsConfig,
}

impl ToolDispatcher {
    pub fn new(engine: Arc<QueryEngine>, limits: LimitsConfig) -> Self {
        Self { engine, limits }
    }

    /// Everything that happens before touching storage.
    pub fn prepare(&self, name: &str, arguments: Value) -> Result<Operation, ToolError> {
        let tool: ToolName = name.parse()?;
        let mut arguments = match arguments {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        normalize_limit(&mut arguments);
        schema::validate(tool.input_schema(), &arguments)?;
        ToolCall::decode(tool, arguments)?.resolve(&self.limits)
    }

    /// Prepare and execute one call. Storage work runs on the blocking pool.
    pub async fn dispatch(&self, name: &str, arguments: Value) -> Result<Value, ToolError> {
        let op = self.prepare(name, arguments)?;
        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || engine.execute(op))
            .await
            .map_err(|e| ToolError::Execution(anyhow::anyhow!("query task failed: {e}")))?
    }

    /// Dispatch and wrap the outcome in an MCP tool result.
    pub async fn call(&self, name: &str, arguments: Value) -> Value {
        match self.dispatch(name, arguments).await {
            Ok(payload) => {
                debug!(tool = name, "tool call succeeded");
                tool_result(&payload)
            }
            Err(err) => {
                match &err {
                    ToolError::Execution(_) => error!(tool = name, error = %err, "tool call failed"),
                    _ => debug!(tool = name, kind = err.kind(), error = %err, "tool call rejected"),
                }
                tool_error(&err)
            }
        }
    }
}

/// Successful result: the payload as a single text content block.
pub fn tool_result(payload: &Value) -> Value {
    json!({
        "content": [{ "type": "text", "text": payload.to_string() }],
        "isError": false
    })
}

/// Failed result: `{"error": kind, "message": ...}` as text, flagged `isError`.
pub fn tool_error(err: &ToolError) -> Value {
    let body = json!({ "error": err.kind(), "message": err.to_string() });
    json!({
        "content": [{ "type": "text", "text": body.to_string() }],
        "isError": true
    })
}
