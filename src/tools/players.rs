//! Global player list tools.
//!
//! These operate on the manager-wide player registry, not on a single
//! server, so none of them take a `server_name`.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_params, relay, require_non_empty_list};
use crate::api::endpoint;
use crate::mcp::context::ToolContext;
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register global player tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(get_players_tool());
    registry.register_tool(add_players_tool());
    registry.register_tool(scan_players_tool());
}

fn get_players_tool() -> RegisteredTool {
    ToolBuilder::new("get_players")
        .description("Get the global list of known players (names and XUIDs)")
        .build(|ctx: ToolContext, _params: Value| async move {
            relay(ctx.client.request(&endpoint::PLAYERS_GET, &[], None).await)
        })
}

#[derive(Debug, Deserialize)]
struct AddPlayersParams {
    players: Vec<String>,
}

fn add_players_tool() -> RegisteredTool {
    ToolBuilder::new("add_players")
        .description("Add players to the global player list")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "players": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Player entries in 'name:xuid' form"
                }
            },
            "required": ["players"]
        }))
        .build(add_players_handler)
}

async fn add_players_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: AddPlayersParams = parse_params(params)?;
    require_non_empty_list("players", &params.players)?;

    let body = json!({ "players": params.players });
    relay(
        ctx.client
            .request(&endpoint::PLAYERS_ADD, &[], Some(&body))
            .await,
    )
}

fn scan_players_tool() -> RegisteredTool {
    ToolBuilder::new("scan_players")
        .description("Scan all server logs to discover players and update the global list")
        .build(|ctx: ToolContext, _params: Value| async move {
            relay(ctx.client.request(&endpoint::PLAYERS_SCAN, &[], None).await)
        })
}
