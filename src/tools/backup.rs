//! Backup and restore tools.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_params, relay, require_non_empty};
use crate::api::endpoint;
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::McpError;
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register backup tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(backup_server_tool());
    registry.register_tool(restore_server_tool());
    registry.register_tool(list_backups_tool());
    registry.register_tool(prune_backups_tool());
}

const BACKUP_TYPES: &[&str] = &["world", "config", "all"];
const RESTORE_TYPES: &[&str] = &["world", "properties", "allowlist", "permissions", "all"];

// ============================================================================
// backup_server
// ============================================================================

#[derive(Debug, Deserialize)]
struct BackupServerParams {
    server_name: String,
    #[serde(default = "default_backup_type")]
    backup_type: String,
    #[serde(default)]
    file_to_backup: Option<String>,
}

fn default_backup_type() -> String {
    "world".to_string()
}

fn backup_server_tool() -> RegisteredTool {
    ToolBuilder::new("backup_server")
        .description("Trigger a backup for a server (world, config, or all)")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_name": {
                    "type": "string",
                    "description": "Name of the server"
                },
                "backup_type": {
                    "type": "string",
                    "enum": BACKUP_TYPES,
                    "description": "Type of backup to perform",
                    "default": "world"
                },
                "file_to_backup": {
                    "type": "string",
                    "description": "Relative path within the server directory; required when backup_type is 'config'"
                }
            },
            "required": ["server_name"]
        }))
        .build(backup_server_handler)
}

async fn backup_server_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: BackupServerParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;

    if !BACKUP_TYPES.contains(&params.backup_type.as_str()) {
        return Err(McpError::InvalidParams(format!(
            "invalid backup_type '{}', must be one of: {}",
            params.backup_type,
            BACKUP_TYPES.join(", ")
        )));
    }

    let mut body = json!({ "backup_type": params.backup_type });
    if params.backup_type == "config" {
        let file = params.file_to_backup.as_deref().unwrap_or_default();
        if file.is_empty() {
            return Err(McpError::InvalidParams(
                "file_to_backup is required when backup_type is 'config'".to_string(),
            ));
        }
        body["file_to_backup"] = json!(file);
    }

    relay(
        ctx.client
            .request(&endpoint::BACKUP_ACTION, &[&params.server_name], Some(&body))
            .await,
    )
}

// ============================================================================
// restore_server
// ============================================================================

#[derive(Debug, Deserialize)]
struct RestoreServerParams {
    server_name: String,
    restore_type: String,
    #[serde(default)]
    backup_file: Option<String>,
}

fn restore_server_tool() -> RegisteredTool {
    ToolBuilder::new("restore_server")
        .description("Restore a server from a backup")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_name": {
                    "type": "string",
                    "description": "Name of the server"
                },
                "restore_type": {
                    "type": "string",
                    "enum": RESTORE_TYPES,
                    "description": "What to restore"
                },
                "backup_file": {
                    "type": "string",
                    "description": "Backup filename; required unless restore_type is 'all'"
                }
            },
            "required": ["server_name", "restore_type"]
        }))
        .build(restore_server_handler)
}

async fn restore_server_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: RestoreServerParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;

    if !RESTORE_TYPES.contains(&params.restore_type.as_str()) {
        return Err(McpError::InvalidParams(format!(
            "invalid restore_type '{}', must be one of: {}",
            params.restore_type,
            RESTORE_TYPES.join(", ")
        )));
    }

    let mut body = json!({ "restore_type": params.restore_type });
    if params.restore_type != "all" {
        let file = params.backup_file.as_deref().unwrap_or_default();
        if file.is_empty() {
            return Err(McpError::InvalidParams(format!(
                "backup_file is required when restore_type is '{}'",
                params.restore_type
            )));
        }
        body["backup_file"] = json!(file);
    }

    relay(
        ctx.client
            .request(
                &endpoint::RESTORE_ACTION,
                &[&params.server_name],
                Some(&body),
            )
            .await,
    )
}

// ============================================================================
// list_backups
// ============================================================================

#[derive(Debug, Deserialize)]
struct ListBackupsParams {
    server_name: String,
    #[serde(default = "default_backup_type")]
    backup_type: String,
}

fn list_backups_tool() -> RegisteredTool {
    ToolBuilder::new("list_backups")
        .description("List available backup files for a server")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_name": {
                    "type": "string",
                    "description": "Name of the server"
                },
                "backup_type": {
                    "type": "string",
                    "description": "Type of backup to list",
                    "default": "world"
                }
            },
            "required": ["server_name"]
        }))
        .build(list_backups_handler)
}

async fn list_backups_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ListBackupsParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;
    require_non_empty("backup_type", &params.backup_type)?;

    relay(
        ctx.client
            .request(
                &endpoint::BACKUP_LIST,
                &[&params.server_name, &params.backup_type],
                None,
            )
            .await,
    )
}

// ============================================================================
// prune_backups
// ============================================================================

#[derive(Debug, Deserialize)]
struct PruneBackupsParams {
    server_name: String,
    #[serde(default)]
    keep: Option<u32>,
}

fn prune_backups_tool() -> RegisteredTool {
    ToolBuilder::new("prune_backups")
        .description("Delete older backups for a server, keeping the newest ones")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_name": {
                    "type": "string",
                    "description": "Name of the server"
                },
                "keep": {
                    "type": "integer",
                    "minimum": 0,
                    "description": "Number of backups to keep; server default if omitted"
                }
            },
            "required": ["server_name"]
        }))
        .build(prune_backups_handler)
}

async fn prune_backups_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: PruneBackupsParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;

    let body = params.keep.map(|keep| json!({ "keep": keep }));
    relay(
        ctx.client
            .request(
                &endpoint::BACKUPS_PRUNE,
                &[&params.server_name],
                body.as_ref(),
            )
            .await,
    )
}
