//! Server properties tools.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{parse_params, relay, require_non_empty, server_scoped_tool};
use crate::api::endpoint;
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::McpError;
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register properties tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(server_scoped_tool(
        "get_properties",
        "Get all server.properties key-value pairs for a server",
        &endpoint::PROPERTIES_GET,
    ));
    registry.register_tool(set_properties_tool());
}

#[derive(Debug, Deserialize)]
struct SetPropertiesParams {
    server_name: String,
    properties: Map<String, Value>,
}

fn set_properties_tool() -> RegisteredTool {
    ToolBuilder::new("set_properties")
        .description(
            "Update server.properties values for a server. Only keys the remote \
             manager allows (gamemode, difficulty, max-players, ...) are applied.",
        )
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_name": {
                    "type": "string",
                    "description": "Name of the server"
                },
                "properties": {
                    "type": "object",
                    "description": "Property names mapped to their new values"
                }
            },
            "required": ["server_name", "properties"]
        }))
        .build(set_properties_handler)
}

async fn set_properties_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SetPropertiesParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;
    if params.properties.is_empty() {
        return Err(McpError::InvalidParams(
            "properties must not be empty".to_string(),
        ));
    }

    let body = json!({ "properties": params.properties });
    relay(
        ctx.client
            .request(
                &endpoint::PROPERTIES_SET,
                &[&params.server_name],
                Some(&body),
            )
            .await,
    )
}
