//! JSON-RPC 2.0 framing: classifying one input line and rendering responses.

use regex::Regex;
use serde_json::{json, Value};
use std::sync::LazyLock;

use crate::error::ProtocolError;

/// A well-formed message, classified by the presence of `id`.
#[derive(Debug, Clone, PartialEq)]
pub enum Incoming {
    Request { id: Value, method: String, params: Value },
    Notification { method: String, params: Value },
}

/// A line that could not be accepted. Only answerable when `id` is known.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejected {
    pub id: Option<Value>,
    pub error: ProtocolError,
}

static ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"id"\s*:\s*(-?\d+|"(?:[^"\\]|\\.)*")"#).expect("valid id pattern")
});

pub fn parse_line(line: &str) -> Result<Incoming, Rejected> {
    let value: Value = serde_json::from_str(line).map_err(|e| Rejected {
        id: salvage_id(line),
        error: ProtocolError::ParseError(e.to_string()),
    })?;

    let Value::Object(mut obj) = value else {
        return Err(Rejected {
            id: None,
            error: ProtocolError::InvalidRequest("expected a JSON object".into()),
        });
    };

    let id = match obj.remove("id") {
        None | Some(Value::Null) => None,
        Some(id @ (Value::Number(_) | Value::String(_))) => Some(id),
        Some(_) => {
            return Err(Rejected {
                id: None,
                error: ProtocolError::InvalidRequest("id must be a number or a string".into()),
            })
        }
    };

    if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
        return Err(Rejected {
            id,
            error: ProtocolError::InvalidRequest("jsonrpc must be \"2.0\"".into()),
        });
    }

    let method = match obj.remove("method") {
        Some(Value::String(method)) => method,
        _ => {
            return Err(Rejected {
                id,
                error: ProtocolError::InvalidRequest("missing method".into()),
            })
        }
    };
    let params = obj.remove("params").unwrap_or(Value::Null);

    Ok(match id {
        Some(id) => Incoming::Request { id, method, params },
        None => Incoming::Notification { method, params },
    })
}

/// Best-effort recovery of a request id from text that is not valid JSON.
/// Only an `"id"` key of the outermost object counts; ids nested in `params`
/// belong to something else.
pub fn salvage_id(raw: &str) -> Option<Value> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in raw.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '{' | '[' => depth += 1,
            '}' | ']' => depth = depth.saturating_sub(1),
            '"' => {
                if depth == 1 {
                    if let Some(captures) = ID_PATTERN.captures(&raw[i..]) {
                        return serde_json::from_str(captures.get(1)?.as_str()).ok();
                    }
                }
                in_string = true;
            }
            _ => {}
        }
    }
    None
}

pub fn success(id: &Value, result: Value) -> String {
    json!({ "jsonrpc": "2.0", "id": id, "result": result }).to_string()
}

pub fn failure(id: &Value, error: &ProtocolError) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": error.code(), "message": error.to_string() }
    })
    .to_string()
}
