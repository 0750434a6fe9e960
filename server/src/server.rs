//! Newline-delimited JSON-RPC server loop.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::dispatcher::{CommandResult, Dispatcher};
use crate::protocol::*;
use crate::tools::{ToolError, call_tool, tool_specs};

/// Serves the dispatcher's tools over a line-oriented JSON-RPC stream.
///
/// Each line is handled to completion before the next is read.
pub struct ToolServer {
    dispatcher: Arc<Dispatcher>,
    info: ServerInfo,
}

impl ToolServer {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            info: ServerInfo::default(),
        }
    }

    pub fn with_info(mut self, info: ServerInfo) -> Self {
        self.info = info;
        self
    }

    /// Reads requests from `reader` until EOF, writing one response line per
    /// request. Notifications get no response.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(name = %self.info.name, version = %self.info.version, "tool server started");
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            debug!(request = %preview(line), "<-");

            let Some(response) = self.handle_line(line).await else {
                continue;
            };
            let out = serde_json::to_string(&response)?;
            debug!(response = %preview(&out), "->");
            writer.write_all(out.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        info!("tool server shutting down");
        Ok(())
    }

    /// Handles one raw message; `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let req: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                // Valid JSON that is not a request object is an invalid request.
                let code = if serde_json::from_str::<Value>(line).is_ok() {
                    INVALID_REQUEST
                } else {
                    PARSE_ERROR
                };
                return Some(JsonRpcResponse::error(None, code, e.to_string()));
            }
        };
        if req.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                req.id,
                INVALID_REQUEST,
                "jsonrpc must be \"2.0\"",
            ));
        }
        if req.is_notification() {
            debug!(method = %req.method, "notification");
            return None;
        }
        Some(self.handle(req).await)
    }

    async fn handle(&self, req: JsonRpcRequest) -> JsonRpcResponse {
        let id = req.id;
        match req.method.as_str() {
            "initialize" => to_response(
                id,
                &InitializeResult {
                    protocol_version: PROTOCOL_VERSION.into(),
                    capabilities: ServerCapabilities {
                        tools: ToolsCapability {
                            list_changed: false,
                        },
                    },
                    server_info: self.info.clone(),
                },
            ),

            "ping" => JsonRpcResponse::success(id, Value::Object(Default::default())),

            "tools/list" | "listTools" => to_response(id, &ToolsListResult { tools: tool_specs() }),

            "tools/call" => {
                let params: ToolCallParams = match serde_json::from_value(req.params) {
                    Ok(p) => p,
                    Err(e) => return JsonRpcResponse::error(id, INVALID_PARAMS, e.to_string()),
                };
                info!(tool = %params.name, "calling tool");
                match call_tool(&self.dispatcher, &params.name, params.arguments).await {
                    Ok(result) => to_response(id, &ToolCallResult::json(&result, false)),
                    Err(ToolError::InvalidArguments { message, .. }) => {
                        JsonRpcResponse::error(id, INVALID_PARAMS, message)
                    }
                    Err(ToolError::Failed(e)) => {
                        warn!(tool = %params.name, error = %e, "tool failed");
                        to_response(id, &ToolCallResult::json(&CommandResult::failure(&e), true))
                    }
                    Err(e @ ToolError::UnknownTool(_)) => {
                        to_response(id, &ToolCallResult::error(e.to_string()))
                    }
                }
            }

            "callTool" => {
                let params: ToolCallParams = match serde_json::from_value(req.params) {
                    Ok(p) => p,
                    Err(_) => {
                        return JsonRpcResponse::error(id, SERVER_ERROR, "Tool name is required");
                    }
                };
                match call_tool(&self.dispatcher, &params.name, params.arguments).await {
                    Ok(result) => to_response(id, &ToolCallResult::json(&result, false)),
                    Err(e) => {
                        warn!(tool = %params.name, error = %e, "legacy tool call failed");
                        JsonRpcResponse::error(id, SERVER_ERROR, e.to_string())
                    }
                }
            }

            other => JsonRpcResponse::error(
                id,
                METHOD_NOT_FOUND,
                format!("Unknown method: {other}"),
            ),
        }
    }
}

fn to_response<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(v) => JsonRpcResponse::success(id, v),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("serialization error: {e}")),
    }
}

fn preview(s: &str) -> String {
    const MAX: usize = 100;
    if s.len() <= MAX {
        return s.to_string();
    }
    let mut end = MAX;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
