//! Tool definitions, one module per remote capability group.
//!
//! Tools come in two shapes: server-scoped operations with no request body
//! go through [`server_scoped_tool`], a generic wrapper around an endpoint
//! descriptor; anything that carries a payload gets its own typed parameter
//! struct and handler. Argument validation always happens before the network
//! is touched.

pub mod allowlist;
pub mod backup;
pub mod permissions;
pub mod players;
pub mod plugins;
pub mod properties;
pub mod scheduler;
pub mod server;
pub mod system;
pub mod world;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::api::{ApiError, Endpoint};
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::{McpError, ToolsCallResult};
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register every tool with the registry.
pub fn register_all_tools(registry: &mut McpRegistry) {
    server::register_tools(registry);
    allowlist::register_tools(registry);
    permissions::register_tools(registry);
    properties::register_tools(registry);
    backup::register_tools(registry);
    world::register_tools(registry);
    players::register_tools(registry);
    plugins::register_tools(registry);
    scheduler::register_tools(registry);
    system::register_tools(registry);
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Deserialize tool arguments into a typed parameter struct.
pub(crate) fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T, McpError> {
    serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))
}

/// Required string arguments must be present and non-empty.
pub(crate) fn require_non_empty(name: &str, value: &str) -> Result<(), McpError> {
    if value.trim().is_empty() {
        return Err(McpError::InvalidParams(format!("{name} must not be empty")));
    }
    Ok(())
}

/// Required list arguments must contain at least one element.
pub(crate) fn require_non_empty_list<T>(name: &str, list: &[T]) -> Result<(), McpError> {
    if list.is_empty() {
        return Err(McpError::InvalidParams(format!("{name} must not be empty")));
    }
    Ok(())
}

/// Map a dispatch outcome to a tool result.
///
/// A successful remote payload is relayed unmodified. Remote, transport, and
/// authentication failures come back as `is_error` tool results so the host
/// can relay them conversationally; they never take the process down.
pub(crate) fn relay(outcome: Result<Value, ApiError>) -> ToolResult {
    match outcome {
        Ok(payload) => {
            ToolsCallResult::json(&payload).map_err(|e| McpError::InternalError(e.to_string()))
        }
        Err(ApiError::Remote {
            status,
            message,
            body,
        }) => {
            let body = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
            Ok(ToolsCallResult::error(format!(
                "Remote API error (status {status}): {message}\n{body}"
            )))
        }
        Err(ApiError::Authentication(msg)) => Ok(ToolsCallResult::error(format!(
            "Authentication with the remote API failed: {msg}"
        ))),
        Err(ApiError::Transport(msg)) => Ok(ToolsCallResult::error(format!(
            "Could not reach the remote API: {msg}"
        ))),
        Err(ApiError::Validation(msg)) => Err(McpError::InvalidParams(msg)),
    }
}

/// Parameters shared by all server-scoped tools.
#[derive(Debug, Deserialize)]
pub(crate) struct ServerParams {
    pub server_name: String,
}

/// JSON schema for tools that take only a server name.
pub(crate) fn server_name_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "server_name": {
                "type": "string",
                "description": "Name of the server"
            }
        },
        "required": ["server_name"]
    })
}

/// Generic wrapper for server-scoped endpoints with no request body.
pub(crate) fn server_scoped_tool(
    name: &str,
    description: &str,
    endpoint: &'static Endpoint,
) -> RegisteredTool {
    ToolBuilder::new(name)
        .description(description)
        .input_schema(server_name_schema())
        .build(move |ctx: ToolContext, params: Value| async move {
            let params: ServerParams = parse_params(params)?;
            require_non_empty("server_name", &params.server_name)?;
            relay(
                ctx.client
                    .request(endpoint, &[&params.server_name], None)
                    .await,
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("server_name", "survival").is_ok());
        assert!(require_non_empty("server_name", "").is_err());
        assert!(require_non_empty("server_name", "   ").is_err());
    }

    #[test]
    fn test_require_non_empty_list() {
        assert!(require_non_empty_list("players", &["Steve".to_string()]).is_ok());
        assert!(require_non_empty_list::<String>("players", &[]).is_err());
    }

    #[test]
    fn test_relay_success_passes_payload_through() {
        let payload = json!({"status": "running"});
        let result = relay(Ok(payload.clone())).unwrap();
        assert!(result.is_error.is_none());
        let crate::mcp::protocol::ToolResultContent::Text { text } = &result.content[0];
        let round_tripped: Value = serde_json::from_str(text).unwrap();
        assert_eq!(round_tripped, payload);
    }

    #[test]
    fn test_relay_remote_error_is_tool_result() {
        let result = relay(Err(ApiError::Remote {
            status: 500,
            message: "internal".to_string(),
            body: json!({"message": "internal"}),
        }))
        .unwrap();
        assert_eq!(result.is_error, Some(true));
        let crate::mcp::protocol::ToolResultContent::Text { text } = &result.content[0];
        assert!(text.contains("500"));
        assert!(text.contains("internal"));
    }

    #[test]
    fn test_relay_transport_error_is_tool_result() {
        let result = relay(Err(ApiError::Transport("connection refused".to_string()))).unwrap();
        assert_eq!(result.is_error, Some(true));
    }

    #[test]
    fn test_relay_validation_error_is_protocol_error() {
        let outcome = relay(Err(ApiError::Validation("bad".to_string())));
        assert!(matches!(outcome, Err(McpError::InvalidParams(_))));
    }

    #[test]
    fn test_register_all_tools_count() {
        let mut registry = McpRegistry::new();
        register_all_tools(&mut registry);
        // One tool per remote capability; keep in sync with the modules above.
        assert_eq!(registry.tool_count(), 52);
    }
}
