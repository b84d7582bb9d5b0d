//! MCP session handling over line-delimited JSON-RPC.
//!
//! [`ProtocolEngine`] owns the handshake state and turns each input line into
//! at most one output line. [`ProtocolEngine::run`] drives it over any async
//! reader/writer pair; the server binds it to stdin/stdout.

pub mod jsonrpc;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::error::ProtocolError;
use crate::tools::{registry, ToolDispatcher};
use jsonrpc::{Incoming, Rejected};

/// Oldest first; the last entry is offered when the client asks for something else.
pub const SUPPORTED_PROTOCOL_VERSIONS: [&str; 3] = ["2024-11-05", "2025-03-26", "2025-06-18"];

const INSTRUCTIONS: &str = "Hindsight gives read access to the user's past conversation history \
and a small long-term memory store. Use search_conversations or search_conversation_titles to \
find earlier discussions, get_conversation or get_message to read them in full, and \
store_memory / search_memory to keep and recall durable facts.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    /// `initialize` answered, waiting for `notifications/initialized`.
    Initializing,
    Ready,
    ShuttingDown,
}

pub struct ProtocolEngine {
    state: SessionState,
    dispatcher: ToolDispatcher,
}

impl ProtocolEngine {
    pub fn new(dispatcher: ToolDispatcher) -> Self {
        Self {
            state: SessionState::Uninitialized,
            dispatcher,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Serve until `reader` reaches end of input.
    pub async fn run<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .context("failed to read from client")?;
            if read == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            if let Some(response) = self.handle_line(&line).await {
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await.context("failed to flush response")?;
            }
        }

        self.state = SessionState::ShuttingDown;
        info!("client closed input, shutting down");
        Ok(())
    }

    /// Handle one line, returning the response line if one is owed.
    pub async fn handle_line(&mut self, line: &str) -> Option<String> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match jsonrpc::parse_line(line) {
            Ok(Incoming::Request { id, method, params }) => {
                debug!(method = %method, id = %id, "request");
                Some(match self.handle_request(&method, params).await {
                    Ok(result) => jsonrpc::success(&id, result),
                    Err(err) => {
                        debug!(method = %method, code = err.code(), error = %err, "request failed");
                        jsonrpc::failure(&id, &err)
                    }
                })
            }
            Ok(Incoming::Notification { method, .. }) => {
                self.handle_notification(&method);
                None
            }
            Err(Rejected { id: Some(id), error }) => {
                warn!(id = %id, error = %error, "rejected input line");
                Some(jsonrpc::failure(&id, &error))
            }
            Err(Rejected { id: None, error }) => {
                warn!(error = %error, "dropped input line without a usable id");
                None
            }
        }
    }

    async fn handle_request(&mut self, method: &str, params: Value) -> Result<Value, ProtocolError> {
        match method {
            "initialize" => self.initialize(&params),
            "ping" => Ok(json!({})),
            "tools/list" => {
                self.require_ready(method)?;
                Ok(json!({ "tools": registry() }))
            }
            "tools/call" => {
                self.require_ready(method)?;
                let name = params
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ProtocolError::InvalidRequest("tools/call requires params.name".into()))?;
                let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);
                Ok(self.dispatcher.call(name, arguments).await)
            }
            other => Err(ProtocolError::MethodNotFound(other.to_string())),
        }
    }

    fn handle_notification(&mut self, method: &str) {
        match (method, self.state) {
            ("notifications/initialized", SessionState::Initializing) => {
                self.state = SessionState::Ready;
                info!("session ready");
            }
            ("notifications/initialized", state) => {
                warn!(?state, "ignoring initialized notification outside the handshake");
            }
            (other, _) => debug!(method = other, "ignoring notification"),
        }
    }

    fn initialize(&mut self, params: &Value) -> Result<Value, ProtocolError> {
        if self.state != SessionState::Uninitialized {
            return Err(ProtocolError::InvalidRequest("already initialized".into()));
        }
        let requested = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .ok_or_else(|| ProtocolError::InvalidRequest("initialize requires params.protocolVersion".into()))?;
        let version = negotiate_version(requested);

        let client = params.pointer("/clientInfo/name").and_then(Value::as_str).unwrap_or("unknown");
        info!(client, requested, version, "initialize");
        self.state = SessionState::Initializing;

        Ok(json!({
            "protocolVersion": version,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
            "instructions": INSTRUCTIONS,
        }))
    }

    fn require_ready(&self, method: &str) -> Result<(), ProtocolError> {
        match self.state {
            SessionState::Ready => Ok(()),
            _ => Err(ProtocolError::NotReady(method.to_string())),
        }
    }
}

/// The client's version when supported, otherwise the newest we speak.
pub fn negotiate_version(requested: &str) -> &'static str {
    SUPPORTED_PROTOCOL_VERSIONS
        .iter()
        .find(|v| **v == requested)
        .or(SUPPORTED_PROTOCOL_VERSIONS.last())
        .copied()
        .unwrap_or("2025-06-18")
}
