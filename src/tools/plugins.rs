//! Plugin management tools.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_params, relay, require_non_empty};
use crate::api::endpoint;
use crate::mcp::context::ToolContext;
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register plugin tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(get_plugins_tool());
    registry.register_tool(set_plugin_enabled_tool());
    registry.register_tool(reload_plugins_tool());
    registry.register_tool(trigger_plugin_event_tool());
}

fn get_plugins_tool() -> RegisteredTool {
    ToolBuilder::new("get_plugins")
        .description("Get the status of all plugins known to the remote manager")
        .build(|ctx: ToolContext, _params: Value| async move {
            relay(ctx.client.request(&endpoint::PLUGINS_LIST, &[], None).await)
        })
}

// ============================================================================
// set_plugin_enabled
// ============================================================================

#[derive(Debug, Deserialize)]
struct SetPluginEnabledParams {
    plugin_name: String,
    enabled: bool,
}

fn set_plugin_enabled_tool() -> RegisteredTool {
    ToolBuilder::new("set_plugin_enabled")
        .description("Enable or disable a plugin")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "plugin_name": {
                    "type": "string",
                    "description": "Name of the plugin"
                },
                "enabled": {
                    "type": "boolean",
                    "description": "Desired state of the plugin"
                }
            },
            "required": ["plugin_name", "enabled"]
        }))
        .build(set_plugin_enabled_handler)
}

async fn set_plugin_enabled_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: SetPluginEnabledParams = parse_params(params)?;
    require_non_empty("plugin_name", &params.plugin_name)?;

    let body = json!({ "enabled": params.enabled });
    relay(
        ctx.client
            .request(
                &endpoint::PLUGIN_SET_ENABLED,
                &[&params.plugin_name],
                Some(&body),
            )
            .await,
    )
}

// ============================================================================
// reload_plugins / trigger_plugin_event
// ============================================================================

fn reload_plugins_tool() -> RegisteredTool {
    ToolBuilder::new("reload_plugins")
        .description("Reload all plugins on the remote manager")
        .build(|ctx: ToolContext, _params: Value| async move {
            relay(
                ctx.client
                    .request(&endpoint::PLUGINS_RELOAD, &[], None)
                    .await,
            )
        })
}

#[derive(Debug, Deserialize)]
struct TriggerPluginEventParams {
    event_name: String,
    #[serde(default)]
    payload: Option<Value>,
}

fn trigger_plugin_event_tool() -> RegisteredTool {
    ToolBuilder::new("trigger_plugin_event")
        .description("Trigger a custom plugin event, optionally with a JSON payload")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "event_name": {
                    "type": "string",
                    "description": "Name of the event to trigger"
                },
                "payload": {
                    "type": "object",
                    "description": "Optional event payload"
                }
            },
            "required": ["event_name"]
        }))
        .build(trigger_plugin_event_handler)
}

async fn trigger_plugin_event_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: TriggerPluginEventParams = parse_params(params)?;
    require_non_empty("event_name", &params.event_name)?;

    let mut body = json!({ "event_name": params.event_name });
    if let Some(payload) = params.payload {
        body["payload"] = payload;
    }
    relay(
        ctx.client
            .request(&endpoint::PLUGINS_TRIGGER_EVENT, &[], Some(&body))
            .await,
    )
}
