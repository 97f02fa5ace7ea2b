// MCP server: JSON-RPC method dispatch plus a line-delimited stream transport

use crate::error::ToolError;
use crate::protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolContent,
    ToolsCapability, PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use futures::{SinkExt, StreamExt};
use serde_json::Value;
use sumble_sdk::SumbleClient;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, info, warn};

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "sumble-mcp";

/// Transport-independent MCP endpoint: owns the tool table and the upstream
/// client, and turns one JSON-RPC request into at most one response.
pub struct McpServer {
    registry: ToolRegistry,
    client: SumbleClient,
}

impl McpServer {
    pub fn new(registry: ToolRegistry, client: SumbleClient) -> Self {
        Self { registry, client }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatch one request. Notifications (no `id`) never produce a response.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            self.handle_notification(&request);
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            // Some clients send this one with an id; it still gets no reply.
            "notifications/initialized" => {
                self.handle_notification(&request);
                return None;
            }
            other => {
                debug!(method = other, "Unknown method");
                JsonRpcResponse::error(id, JsonRpcError::method_not_found(other))
            }
        };

        Some(response)
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => debug!("Client finished initialization"),
            "notifications/cancelled" => debug!("Cancellation notification received (no-op)"),
            other => debug!(method = other, "Unknown notification received"),
        }
    }

    fn handle_initialize(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        info!(
            client = params.client_info.as_ref().map(|c| c.name.as_str()).unwrap_or("unknown"),
            client_version = params.protocol_version.as_deref().unwrap_or("unspecified"),
            negotiated_version = PROTOCOL_VERSION,
            "MCP initialize request"
        );

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        to_response(id, &result)
    }

    fn handle_tools_list(&self, id: Value) -> JsonRpcResponse {
        let result = ListToolsResult {
            tools: self.registry.list_schemas(),
        };
        to_response(id, &result)
    }

    async fn handle_tools_call(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value::<CallToolParams>) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params(format!("Invalid tools/call params: {}", e)),
                )
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing tools/call params"),
                )
            }
        };

        info!(tool = %params.name, "Tool call");

        match self
            .registry
            .call(&self.client, &params.name, params.arguments)
            .await
        {
            Ok(value) => match serde_json::to_string_pretty(&value) {
                Ok(text) => to_response(
                    id,
                    &CallToolResult {
                        content: vec![ToolContent::text(text)],
                        is_error: None,
                    },
                ),
                Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
            },
            Err(err) => {
                log_tool_error(&params.name, &err);
                JsonRpcResponse::error(id, JsonRpcError::from(&err))
            }
        }
    }

    /// Serve newline-delimited JSON-RPC over a reader/writer pair until EOF.
    ///
    /// There is no out-of-band channel here, so a line that fails to parse is
    /// answered with a JSON-RPC parse error carrying a `null` id.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new());
        let mut sink = FramedWrite::new(writer, LinesCodec::new());

        while let Some(line) = lines.next().await {
            let line = line.context("Failed to read from MCP client")?;
            if line.trim().is_empty() {
                continue;
            }

            let response = match serde_json::from_str::<JsonRpcRequest>(&line) {
                Ok(request) => self.handle_request(request).await,
                Err(e) => {
                    warn!(error = %e, "Malformed JSON-RPC message");
                    Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()))
                }
            };

            if let Some(response) = response {
                let encoded = serde_json::to_string(&response)?;
                sink.send(encoded)
                    .await
                    .context("Failed to write to MCP client")?;
            }
        }

        info!("MCP client closed the stream");
        Ok(())
    }

    /// Serve over the process's stdin/stdout.
    pub async fn serve_stdio(&self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }
}

fn to_response<T: serde::Serialize>(id: Value, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, JsonRpcError::internal_error(e.to_string())),
    }
}

fn log_tool_error(tool: &str, err: &ToolError) {
    if err.is_local() {
        debug!(tool = tool, error = %err, "Tool call rejected");
    } else {
        warn!(tool = tool, error = %err, "Tool call failed upstream");
    }
}
