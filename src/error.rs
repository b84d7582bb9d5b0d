//! Error taxonomy.
//!
//! [`ProtocolError`]s become JSON-RPC `error` objects. [`ToolError`]s become
//! successful responses whose content is flagged `isError`, so the client can
//! tell a misbehaving exchange from a tool call that failed for a domain reason.

use thiserror::Error;

/// JSON-RPC level failures. None of them end the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Server not initialized: `{0}` received before the initialized notification")]
    NotReady(String),
}

impl ProtocolError {
    pub fn code(&self) -> i64 {
        match self {
            Self::ParseError(_) => -32700,
            Self::InvalidRequest(_) => -32600,
            Self::MethodNotFound(_) => -32601,
            Self::NotReady(_) => -32002,
        }
    }
}

/// Failures of a single tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("unknown tool: {0}")]
    ToolNotFound(String),

    #[error("invalid argument `{field}`: {reason}")]
    InvalidArguments { field: String, reason: String },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("tool execution failed: {0:#}")]
    Execution(#[from] anyhow::Error),
}

impl ToolError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Stable machine-readable tag carried in the error payload.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ToolNotFound(_) => "tool_not_found",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::NotFound { .. } => "not_found",
            Self::Execution(_) => "execution_error",
        }
    }
}
