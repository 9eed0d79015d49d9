//! MCP stdio transport
//!
//! Serves the MCP protocol over newline-delimited JSON-RPC on stdin/stdout.
//! Diagnostics go to stderr via `tracing`; stdout carries protocol frames
//! only. Tool calls run inline: the host multiplexes requests and each one
//! suspends only while its outbound HTTP call is in flight.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use super::context::ToolContext;
use super::protocol::{
    methods, InitializeParams, InitializeResult, McpError, McpRequest, McpResponse, PingResult,
    ServerCapabilities, ServerInfo, ToolsCallParams, ToolsCapability, ToolsListResult,
    MCP_PROTOCOL_VERSION,
};
use super::registry::McpRegistry;

/// Per-host state for one stdio session.
#[derive(Debug, Default)]
pub struct HostSession {
    initialized: bool,
    shutdown: bool,
}

impl HostSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once the host has sent `shutdown`.
    pub fn shutdown_requested(&self) -> bool {
        self.shutdown
    }
}

/// Run the stdio server until stdin reaches EOF or the host sends `shutdown`.
pub async fn run_stdio_server(registry: Arc<McpRegistry>, ctx: ToolContext) -> anyhow::Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    info!("serving MCP on stdio ({} tools)", registry.tool_count());

    let mut session = HostSession::new();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_message(&line, &ctx, &registry, &mut session).await;

        if let Some(response) = response {
            match serde_json::to_string(&response) {
                Ok(json) => {
                    stdout.write_all(json.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                    stdout.flush().await?;
                }
                Err(e) => {
                    error!("failed to serialize MCP response: {}", e);
                }
            }
        }

        if session.shutdown_requested() {
            info!("host requested shutdown");
            return Ok(());
        }
    }

    info!("stdin closed, shutting down");
    Ok(())
}

/// Handle a single MCP message. Returns `None` for notifications.
pub async fn handle_message(
    text: &str,
    ctx: &ToolContext,
    registry: &McpRegistry,
    session: &mut HostSession,
) -> Option<McpResponse> {
    // Parse the request
    let request: McpRequest = match serde_json::from_str(text) {
        Ok(req) => req,
        Err(e) => {
            return Some(McpResponse::error(
                None,
                McpError::ParseError(e.to_string()),
            ));
        }
    };

    // Dispatch based on method
    let result = match request.method.as_str() {
        methods::INITIALIZE => handle_initialize(&request, session),
        methods::INITIALIZED => {
            // Notification, no response needed
            return None;
        }
        methods::PING => serde_json::to_value(PingResult {})
            .map_err(|e| McpError::InternalError(e.to_string())),
        methods::TOOLS_LIST => {
            if !session.initialized {
                Err(McpError::InvalidRequest("Not initialized".to_string()))
            } else {
                handle_tools_list(registry)
            }
        }
        methods::TOOLS_CALL => {
            if !session.initialized {
                Err(McpError::InvalidRequest("Not initialized".to_string()))
            } else {
                handle_tools_call(&request, ctx, registry).await
            }
        }
        methods::SHUTDOWN => {
            // Host is disconnecting gracefully; the serve loop exits after
            // this reply goes out.
            session.shutdown = true;
            Ok(serde_json::json!({}))
        }
        other => Err(McpError::MethodNotFound(other.to_string())),
    };

    // Requests without an id are notifications and get no reply.
    let request_id = request.id?;

    Some(match result {
        Ok(value) => McpResponse::success(request_id, value),
        Err(error) => McpResponse::error(Some(request_id), error),
    })
}

fn handle_initialize(
    request: &McpRequest,
    session: &mut HostSession,
) -> Result<serde_json::Value, McpError> {
    let params: InitializeParams = request
        .params
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?
        .unwrap_or_default();

    if let Some(client) = &params.client_info {
        debug!("initialize from {} {}", client.name, client.version);
    }

    session.initialized = true;

    let result = InitializeResult {
        protocol_version: MCP_PROTOCOL_VERSION.to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability { list_changed: None }),
        },
        server_info: ServerInfo {
            name: "bedrock-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

fn handle_tools_list(registry: &McpRegistry) -> Result<serde_json::Value, McpError> {
    let result = ToolsListResult {
        tools: registry.tool_definitions(),
    };

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}

async fn handle_tools_call(
    request: &McpRequest,
    ctx: &ToolContext,
    registry: &McpRegistry,
) -> Result<serde_json::Value, McpError> {
    let params: ToolsCallParams = request
        .params
        .clone()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::InvalidParams(e.to_string()))?
        .ok_or_else(|| McpError::InvalidParams("Missing params".to_string()))?;

    let tool = registry
        .get_tool(&params.name)
        .ok_or_else(|| McpError::MethodNotFound(format!("Unknown tool: {}", params.name)))?;

    debug!("tool call: {}", params.name);

    let arguments = params.arguments.unwrap_or(serde_json::json!({}));
    let result = (tool.handler)(ctx.clone(), arguments).await?;

    serde_json::to_value(result).map_err(|e| McpError::InternalError(e.to_string()))
}
