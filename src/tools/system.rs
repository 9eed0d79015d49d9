//! Application-level tools: system info, global settings, themes, the
//! download cache, per-server service flags, and remote logout.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_params, relay, require_non_empty};
use crate::api::endpoint;
use crate::api::Endpoint;
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::McpError;
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register application-level tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(global_tool(
        "get_system_info",
        "Get remote manager host information (OS type, application version)",
        &endpoint::SYSTEM_INFO,
    ));
    registry.register_tool(global_tool(
        "get_settings",
        "Get all global application settings",
        &endpoint::SETTINGS_GET,
    ));
    registry.register_tool(set_setting_tool());
    registry.register_tool(global_tool(
        "reload_settings",
        "Reload global application settings from disk",
        &endpoint::SETTINGS_RELOAD,
    ));
    registry.register_tool(global_tool(
        "get_themes",
        "List available UI themes",
        &endpoint::THEMES_GET,
    ));
    registry.register_tool(global_tool(
        "prune_downloads",
        "Prune the download cache on the remote manager",
        &endpoint::DOWNLOADS_PRUNE,
    ));
    registry.register_tool(update_service_settings_tool());
    registry.register_tool(logout_tool());
}

/// No-parameter tools against application-wide endpoints.
fn global_tool(name: &str, description: &str, endpoint: &'static Endpoint) -> RegisteredTool {
    ToolBuilder::new(name)
        .description(description)
        .build(move |ctx: ToolContext, _params: Value| async move {
            relay(ctx.client.request(endpoint, &[], None).await)
        })
}

// ============================================================================
// set_setting
// ============================================================================

#[derive(Debug, Deserialize)]
struct SetSettingParams {
    key: String,
    value: Value,
}

fn set_setting_tool() -> RegisteredTool {
    ToolBuilder::new("set_setting")
        .description("Set one global application setting by dotted key")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "key": {
                    "type": "string",
                    "description": "Setting key, e.g. 'web.port'"
                },
                "value": {
                    "description": "New value for the setting"
                }
            },
            "required": ["key", "value"]
        }))
        .build(set_setting_handler)
}

async fn set_setting_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SetSettingParams = parse_params(params)?;
    require_non_empty("key", &params.key)?;

    let body = json!({ "key": params.key, "value": params.value });
    relay(
        ctx.client
            .request(&endpoint::SETTINGS_SET, &[], Some(&body))
            .await,
    )
}

// ============================================================================
// update_service_settings
// ============================================================================

#[derive(Debug, Deserialize)]
struct UpdateServiceSettingsParams {
    server_name: String,
    #[serde(default)]
    autoupdate: Option<bool>,
    #[serde(default)]
    autostart: Option<bool>,
}

fn update_service_settings_tool() -> RegisteredTool {
    ToolBuilder::new("update_service_settings")
        .description("Update a server's service flags (autoupdate, autostart)")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_name": {
                    "type": "string",
                    "description": "Name of the server"
                },
                "autoupdate": {
                    "type": "boolean",
                    "description": "Update the server automatically before it starts"
                },
                "autostart": {
                    "type": "boolean",
                    "description": "Start the server when the manager starts"
                }
            },
            "required": ["server_name"]
        }))
        .build(update_service_settings_handler)
}

async fn update_service_settings_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: UpdateServiceSettingsParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;
    if params.autoupdate.is_none() && params.autostart.is_none() {
        return Err(McpError::InvalidParams(
            "at least one of autoupdate or autostart must be provided".to_string(),
        ));
    }

    let mut body = json!({});
    if let Some(autoupdate) = params.autoupdate {
        body["autoupdate"] = json!(autoupdate);
    }
    if let Some(autostart) = params.autostart {
        body["autostart"] = json!(autostart);
    }
    relay(
        ctx.client
            .request(
                &endpoint::SERVICE_UPDATE,
                &[&params.server_name],
                Some(&body),
            )
            .await,
    )
}

// ============================================================================
// logout
// ============================================================================

fn logout_tool() -> RegisteredTool {
    ToolBuilder::new("logout")
        .description(
            "Log out from the remote manager and drop the local credential. \
             Subsequent tools log in again automatically.",
        )
        .build(|ctx: ToolContext, _params: Value| async move {
            let outcome = ctx
                .client
                .request_unauthenticated(&endpoint::LOGOUT, &[])
                .await;
            ctx.client.drop_session().await;
            relay(outcome)
        })
}
