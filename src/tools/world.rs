//! World and addon management tools.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_params, relay, require_non_empty, server_scoped_tool};
use crate::api::endpoint;
use crate::api::Endpoint;
use crate::mcp::context::ToolContext;
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register world and addon tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(server_scoped_tool(
        "export_world",
        "Export the current world of a server to a .mcworld file",
        &endpoint::WORLD_EXPORT,
    ));
    registry.register_tool(server_scoped_tool(
        "reset_world",
        "Reset (delete) the current world of a server. Irreversible.",
        &endpoint::WORLD_RESET,
    ));
    registry.register_tool(install_file_tool(
        "install_world",
        "Install a world from a .mcworld file onto a server",
        "Relative path to the .mcworld file within the content/worlds directory",
        &endpoint::WORLD_INSTALL,
    ));
    registry.register_tool(install_file_tool(
        "install_addon",
        "Install an addon pack (.mcaddon or .mcpack) onto a server",
        "Relative path to the addon file within the content/addons directory",
        &endpoint::ADDON_INSTALL,
    ));
    registry.register_tool(list_content_tool(
        "list_worlds",
        "List world files available for installation",
        &endpoint::CONTENT_WORLDS,
    ));
    registry.register_tool(list_content_tool(
        "list_addons",
        "List addon files available for installation",
        &endpoint::CONTENT_ADDONS,
    ));
}

// ============================================================================
// install_world / install_addon
// ============================================================================

#[derive(Debug, Deserialize)]
struct InstallFileParams {
    server_name: String,
    filename: String,
}

fn install_file_tool(
    name: &str,
    description: &str,
    filename_description: &str,
    endpoint: &'static Endpoint,
) -> RegisteredTool {
    ToolBuilder::new(name)
        .description(description)
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_name": {
                    "type": "string",
                    "description": "Name of the server"
                },
                "filename": {
                    "type": "string",
                    "description": filename_description
                }
            },
            "required": ["server_name", "filename"]
        }))
        .build(move |ctx: ToolContext, params: Value| async move {
            install_file_handler(ctx, params, endpoint).await
        })
}

async fn install_file_handler(
    ctx: ToolContext,
    params: Value,
    endpoint: &'static Endpoint,
) -> ToolResult {
    let params: InstallFileParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;
    require_non_empty("filename", &params.filename)?;

    let body = json!({ "filename": params.filename });
    relay(
        ctx.client
            .request(endpoint, &[&params.server_name], Some(&body))
            .await,
    )
}

// ============================================================================
// list_worlds / list_addons
// ============================================================================

fn list_content_tool(
    name: &str,
    description: &str,
    endpoint: &'static Endpoint,
) -> RegisteredTool {
    ToolBuilder::new(name)
        .description(description)
        .build(move |ctx: ToolContext, _params: Value| async move {
            relay(ctx.client.request(endpoint, &[], None).await)
        })
}
