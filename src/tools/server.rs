//! Server lifecycle tools.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_params, relay, require_non_empty, server_scoped_tool};
use crate::api::endpoint;
use crate::mcp::context::ToolContext;
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register server lifecycle tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(list_servers_tool());
    registry.register_tool(server_scoped_tool(
        "get_server_status",
        "Get the running status of a specific server",
        &endpoint::SERVER_STATUS,
    ));
    registry.register_tool(server_scoped_tool(
        "start_server",
        "Initiate the startup sequence for a specific server",
        &endpoint::SERVER_START,
    ));
    registry.register_tool(server_scoped_tool(
        "stop_server",
        "Initiate the shutdown sequence for a specific server",
        &endpoint::SERVER_STOP,
    ));
    registry.register_tool(server_scoped_tool(
        "restart_server",
        "Perform a complete restart of a specific server",
        &endpoint::SERVER_RESTART,
    ));
    registry.register_tool(server_scoped_tool(
        "validate_server",
        "Verify that a server exists and is properly configured",
        &endpoint::SERVER_VALIDATE,
    ));
    registry.register_tool(server_scoped_tool(
        "get_server_version",
        "Retrieve the installed version of a specific server",
        &endpoint::SERVER_VERSION,
    ));
    registry.register_tool(server_scoped_tool(
        "get_server_process_info",
        "Get process information (PID, memory usage) for a running server",
        &endpoint::SERVER_PROCESS_INFO,
    ));
    registry.register_tool(server_scoped_tool(
        "get_config_status",
        "Get the configuration status of a specific server",
        &endpoint::SERVER_CONFIG_STATUS,
    ));
    registry.register_tool(server_scoped_tool(
        "delete_server",
        "Permanently delete a server and its data. Irreversible.",
        &endpoint::SERVER_DELETE,
    ));
    registry.register_tool(send_command_tool());
    registry.register_tool(update_server_tool());
    registry.register_tool(install_server_tool());
}

// ============================================================================
// list_servers
// ============================================================================

fn list_servers_tool() -> RegisteredTool {
    ToolBuilder::new("list_servers")
        .description("List all managed servers with their status and version")
        .build(|ctx: ToolContext, _params: Value| async move {
            relay(ctx.client.request(&endpoint::SERVERS, &[], None).await)
        })
}

// ============================================================================
// send_command
// ============================================================================

#[derive(Debug, Deserialize)]
struct SendCommandParams {
    server_name: String,
    command: String,
}

fn send_command_tool() -> RegisteredTool {
    ToolBuilder::new("send_command")
        .description("Execute a command on a server's console")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_name": {
                    "type": "string",
                    "description": "Name of the server"
                },
                "command": {
                    "type": "string",
                    "description": "The exact command string to execute"
                }
            },
            "required": ["server_name", "command"]
        }))
        .build(send_command_handler)
}

async fn send_command_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SendCommandParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;
    require_non_empty("command", &params.command)?;

    let body = json!({ "command": params.command });
    relay(
        ctx.client
            .request(
                &endpoint::SERVER_SEND_COMMAND,
                &[&params.server_name],
                Some(&body),
            )
            .await,
    )
}

// ============================================================================
// update_server
// ============================================================================

#[derive(Debug, Deserialize)]
struct UpdateServerParams {
    server_name: String,
    #[serde(default)]
    version: Option<String>,
}

fn update_server_tool() -> RegisteredTool {
    ToolBuilder::new("update_server")
        .description("Update a server to the latest or a specific version")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_name": {
                    "type": "string",
                    "description": "Name of the server"
                },
                "version": {
                    "type": "string",
                    "description": "Optional version string to update to; latest if omitted"
                }
            },
            "required": ["server_name"]
        }))
        .build(update_server_handler)
}

async fn update_server_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: UpdateServerParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;

    let mut body = json!({ "action": "update" });
    if let Some(version) = &params.version {
        body["version"] = json!(version);
    }
    relay(
        ctx.client
            .request(&endpoint::SERVER_UPDATE, &[&params.server_name], Some(&body))
            .await,
    )
}

// ============================================================================
// install_server
// ============================================================================

#[derive(Debug, Deserialize)]
struct InstallServerParams {
    server_config: Value,
}

fn install_server_tool() -> RegisteredTool {
    ToolBuilder::new("install_server")
        .description("Install a new server from a configuration object (name, version, ...)")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_config": {
                    "type": "object",
                    "description": "Server configuration details, e.g. {\"name\": \"survival\", \"version\": \"LATEST\"}"
                }
            },
            "required": ["server_config"]
        }))
        .build(install_server_handler)
}

async fn install_server_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: InstallServerParams = parse_params(params)?;
    match params.server_config.as_object() {
        Some(config) if !config.is_empty() => {}
        _ => {
            return Err(crate::mcp::protocol::McpError::InvalidParams(
                "server_config must be a non-empty object".to_string(),
            ))
        }
    }

    relay(
        ctx.client
            .request(&endpoint::SERVER_INSTALL, &[], Some(&params.server_config))
            .await,
    )
}
