//! Allowlist (whitelist) tools.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_params, relay, require_non_empty, require_non_empty_list, server_scoped_tool};
use crate::api::endpoint;
use crate::mcp::context::ToolContext;
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register allowlist tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(server_scoped_tool(
        "get_allowlist",
        "Retrieve the current allowlist for a server",
        &endpoint::ALLOWLIST_GET,
    ));
    registry.register_tool(allowlist_add_tool());
    registry.register_tool(allowlist_remove_tool());
}

// ============================================================================
// allowlist_add
// ============================================================================

#[derive(Debug, Deserialize)]
struct AllowlistAddParams {
    server_name: String,
    players: Vec<String>,
    #[serde(default)]
    ignores_player_limit: bool,
}

fn allowlist_add_tool() -> RegisteredTool {
    ToolBuilder::new("allowlist_add")
        .description("Add one or more players to a server's allowlist")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_name": {
                    "type": "string",
                    "description": "Name of the server"
                },
                "players": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Player names (gamertags) to add"
                },
                "ignores_player_limit": {
                    "type": "boolean",
                    "description": "Set the ignoresPlayerLimit flag for the added players",
                    "default": false
                }
            },
            "required": ["server_name", "players"]
        }))
        .build(allowlist_add_handler)
}

async fn allowlist_add_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: AllowlistAddParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;
    require_non_empty_list("players", &params.players)?;

    let body = json!({
        "players": params.players,
        "ignoresPlayerLimit": params.ignores_player_limit,
    });
    relay(
        ctx.client
            .request(&endpoint::ALLOWLIST_ADD, &[&params.server_name], Some(&body))
            .await,
    )
}

// ============================================================================
// allowlist_remove
// ============================================================================

#[derive(Debug, Deserialize)]
struct AllowlistRemoveParams {
    server_name: String,
    players: Vec<String>,
}

fn allowlist_remove_tool() -> RegisteredTool {
    ToolBuilder::new("allowlist_remove")
        .description("Remove one or more players from a server's allowlist")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_name": {
                    "type": "string",
                    "description": "Name of the server"
                },
                "players": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Player names to remove"
                }
            },
            "required": ["server_name", "players"]
        }))
        .build(allowlist_remove_handler)
}

async fn allowlist_remove_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: AllowlistRemoveParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;
    require_non_empty_list("players", &params.players)?;

    let body = json!({ "players": params.players });
    relay(
        ctx.client
            .request(
                &endpoint::ALLOWLIST_REMOVE,
                &[&params.server_name],
                Some(&body),
            )
            .await,
    )
}
