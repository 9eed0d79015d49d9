//! Player permission tools.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_params, relay, require_non_empty, require_non_empty_list, server_scoped_tool};
use crate::api::endpoint;
use crate::mcp::context::ToolContext;
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register permission tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(server_scoped_tool(
        "get_permissions",
        "Get player permission levels for a server",
        &endpoint::PERMISSIONS_GET,
    ));
    registry.register_tool(set_permissions_tool());
}

#[derive(Debug, Deserialize)]
struct SetPermissionsParams {
    server_name: String,
    permissions: Vec<Value>,
}

fn set_permissions_tool() -> RegisteredTool {
    ToolBuilder::new("set_permissions")
        .description("Update permission levels for players on a server")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_name": {
                    "type": "string",
                    "description": "Name of the server"
                },
                "permissions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "xuid": { "type": "string" },
                            "name": { "type": "string" },
                            "permission_level": {
                                "type": "string",
                                "enum": ["visitor", "member", "operator"]
                            }
                        },
                        "required": ["xuid", "name", "permission_level"]
                    },
                    "description": "Permission entries to apply"
                }
            },
            "required": ["server_name", "permissions"]
        }))
        .build(set_permissions_handler)
}

async fn set_permissions_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SetPermissionsParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;
    require_non_empty_list("permissions", &params.permissions)?;

    let body = json!({ "permissions": params.permissions });
    relay(
        ctx.client
            .request(
                &endpoint::PERMISSIONS_SET,
                &[&params.server_name],
                Some(&body),
            )
            .await,
    )
}
