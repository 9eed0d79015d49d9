//! Scheduled job tools.
//!
//! The remote manager exposes two schedulers depending on its host OS: cron
//! jobs on Linux and task scheduler entries on Windows. Both are relayed
//! here; the remote rejects the variant that does not apply.

use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{parse_params, relay, require_non_empty};
use crate::api::endpoint;
use crate::api::Endpoint;
use crate::mcp::context::ToolContext;
use crate::mcp::protocol::McpError;
use crate::mcp::registry::{McpRegistry, RegisteredTool, ToolBuilder, ToolResult};

/// Register scheduler tools with the registry
pub fn register_tools(registry: &mut McpRegistry) {
    registry.register_tool(job_details_tool(
        "add_cron_job",
        "Add a cron job for a server (Linux hosts only)",
        "Cron job fields, e.g. {\"minute\": \"0\", \"hour\": \"*/6\", \"command\": \"backup\"}",
        &endpoint::CRON_ADD,
    ));
    registry.register_tool(job_details_tool(
        "modify_cron_job",
        "Modify an existing cron job for a server (Linux hosts only)",
        "Cron job fields identifying the job and its new schedule",
        &endpoint::CRON_MODIFY,
    ));
    registry.register_tool(delete_cron_job_tool());
    registry.register_tool(job_details_tool(
        "add_task",
        "Add a scheduled task for a server (Windows hosts only)",
        "Task fields, e.g. {\"command\": \"backup\", \"triggers\": [...]}",
        &endpoint::TASK_ADD,
    ));
    registry.register_tool(get_task_details_tool());
    registry.register_tool(modify_task_tool());
    registry.register_tool(delete_task_tool());
}

// ============================================================================
// add_cron_job / modify_cron_job / add_task share one shape: a server name
// plus a free-form details object forwarded as the request body.
// ============================================================================

#[derive(Debug, Deserialize)]
struct JobDetailsParams {
    server_name: String,
    job_details: Map<String, Value>,
}

fn job_details_tool(
    name: &str,
    description: &str,
    details_description: &str,
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
                "job_details": {
                    "type": "object",
                    "description": details_description
                }
            },
            "required": ["server_name", "job_details"]
        }))
        .build(move |ctx: ToolContext, params: Value| async move {
            job_details_handler(ctx, params, endpoint).await
        })
}

async fn job_details_handler(
    ctx: ToolContext,
    params: Value,
    endpoint: &'static Endpoint,
) -> ToolResult {
    let params: JobDetailsParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;
    if params.job_details.is_empty() {
        return Err(McpError::InvalidParams(
            "job_details must not be empty".to_string(),
        ));
    }

    let body = Value::Object(params.job_details);
    relay(
        ctx.client
            .request(endpoint, &[&params.server_name], Some(&body))
            .await,
    )
}

// ============================================================================
// delete_cron_job
// ============================================================================

#[derive(Debug, Deserialize)]
struct DeleteCronJobParams {
    server_name: String,
    job_id: String,
}

fn delete_cron_job_tool() -> RegisteredTool {
    ToolBuilder::new("delete_cron_job")
        .description("Delete a cron job for a server (Linux hosts only)")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_name": {
                    "type": "string",
                    "description": "Name of the server"
                },
                "job_id": {
                    "type": "string",
                    "description": "Identifier of the cron job to delete"
                }
            },
            "required": ["server_name", "job_id"]
        }))
        .build(delete_cron_job_handler)
}

async fn delete_cron_job_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: DeleteCronJobParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;
    require_non_empty("job_id", &params.job_id)?;

    let body = json!({ "job_id": params.job_id });
    relay(
        ctx.client
            .request(&endpoint::CRON_DELETE, &[&params.server_name], Some(&body))
            .await,
    )
}

// ============================================================================
// get_task_details / modify_task / delete_task
// ============================================================================

#[derive(Debug, Deserialize)]
struct TaskNameParams {
    server_name: String,
    task_name: String,
}

fn task_name_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "server_name": {
                "type": "string",
                "description": "Name of the server"
            },
            "task_name": {
                "type": "string",
                "description": "Name of the scheduled task"
            }
        },
        "required": ["server_name", "task_name"]
    })
}

fn get_task_details_tool() -> RegisteredTool {
    ToolBuilder::new("get_task_details")
        .description("Get details of a scheduled task for a server (Windows hosts only)")
        .input_schema(task_name_schema())
        .build(get_task_details_handler)
}

async fn get_task_details_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: TaskNameParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;
    require_non_empty("task_name", &params.task_name)?;

    let body = json!({ "task_name": params.task_name });
    relay(
        ctx.client
            .request(&endpoint::TASK_DETAILS, &[&params.server_name], Some(&body))
            .await,
    )
}

#[derive(Debug, Deserialize)]
struct ModifyTaskParams {
    server_name: String,
    task_name: String,
    task_details: Map<String, Value>,
}

fn modify_task_tool() -> RegisteredTool {
    ToolBuilder::new("modify_task")
        .description("Modify a scheduled task for a server (Windows hosts only)")
        .input_schema(json!({
            "type": "object",
            "properties": {
                "server_name": {
                    "type": "string",
                    "description": "Name of the server"
                },
                "task_name": {
                    "type": "string",
                    "description": "Name of the task to modify"
                },
                "task_details": {
                    "type": "object",
                    "description": "Updated task fields"
                }
            },
            "required": ["server_name", "task_name", "task_details"]
        }))
        .build(modify_task_handler)
}

async fn modify_task_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: ModifyTaskParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;
    require_non_empty("task_name", &params.task_name)?;
    if params.task_details.is_empty() {
        return Err(McpError::InvalidParams(
            "task_details must not be empty".to_string(),
        ));
    }

    let body = Value::Object(params.task_details);
    relay(
        ctx.client
            .request(
                &endpoint::TASK_MODIFY,
                &[&params.server_name, &params.task_name],
                Some(&body),
            )
            .await,
    )
}

fn delete_task_tool() -> RegisteredTool {
    ToolBuilder::new("delete_task")
        .description("Delete a scheduled task for a server (Windows hosts only)")
        .input_schema(task_name_schema())
        .build(delete_task_handler)
}

async fn delete_task_handler(ctx: ToolContext, params: Value) -> ToolResult {
    let params: TaskNameParams = parse_params(params)?;
    require_non_empty("server_name", &params.server_name)?;
    require_non_empty("task_name", &params.task_name)?;

    relay(
        ctx.client
            .request(
                &endpoint::TASK_DELETE,
                &[&params.server_name, &params.task_name],
                None,
            )
            .await,
    )
}
