//! MCP Tool Registry
//!
//! Manages registration and lookup of the tools exposed to the host. Each
//! tool pairs a name, description, and JSON-schema input description with an
//! async handler.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use super::context::ToolContext;
use super::protocol::{McpError, ToolDefinition, ToolsCallResult};

/// Result type for tool execution
pub type ToolResult = Result<ToolsCallResult, McpError>;

/// Boxed future for async tool execution
pub type ToolFuture = Pin<Box<dyn Future<Output = ToolResult> + Send>>;

/// Tool handler function type
pub type ToolHandler = Arc<dyn Fn(ToolContext, Value) -> ToolFuture + Send + Sync>;

/// A registered tool with metadata and handler
pub struct RegisteredTool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub handler: ToolHandler,
}

/// Registry for MCP tools
pub struct McpRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl McpRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool
    pub fn register_tool(&mut self, tool: RegisteredTool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Tool definitions for `tools/list`, sorted by name so the listing is
    /// deterministic.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<ToolDefinition> = self
            .tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name.clone(),
                description: tool.description.clone(),
                input_schema: tool.input_schema.clone(),
            })
            .collect();
        definitions.sort_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    /// Get the number of registered tools
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }
}

impl Default for McpRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Builder helpers
// ============================================================================

/// Builder for registering a tool
pub struct ToolBuilder {
    name: String,
    description: String,
    input_schema: Value,
}

impl ToolBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn input_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }

    pub fn build<F, Fut>(self, handler: F) -> RegisteredTool
    where
        F: Fn(ToolContext, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ToolResult> + Send + 'static,
    {
        RegisteredTool {
            name: self.name,
            description: self.description,
            input_schema: self.input_schema,
            handler: Arc::new(move |ctx, params| Box::pin(handler(ctx, params))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_tool(name: &str) -> RegisteredTool {
        ToolBuilder::new(name)
            .description("dummy")
            .build(|_ctx, _params| async { Ok(ToolsCallResult::text("ok")) })
    }

    #[test]
    fn test_registry_empty() {
        let registry = McpRegistry::new();
        assert_eq!(registry.tool_count(), 0);
        assert!(registry.get_tool("anything").is_none());
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = McpRegistry::new();
        registry.register_tool(dummy_tool("start_server"));
        assert_eq!(registry.tool_count(), 1);
        assert!(registry.get_tool("start_server").is_some());
        assert!(registry.get_tool("stop_server").is_none());
    }

    #[test]
    fn test_definitions_sorted_by_name() {
        let mut registry = McpRegistry::new();
        registry.register_tool(dummy_tool("zeta"));
        registry.register_tool(dummy_tool("alpha"));
        registry.register_tool(dummy_tool("mid"));

        let names: Vec<String> = registry
            .tool_definitions()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}
