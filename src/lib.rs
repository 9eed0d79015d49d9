//! Bedrock MCP Server Library
//!
//! A thin MCP adapter that exposes a remote Bedrock Server Manager HTTP API
//! as tool calls over stdio. This library exposes the internal modules for
//! testing and potential reuse.

pub mod api;
pub mod config;
pub mod mcp;
pub mod tools;

// Re-export commonly used types for convenience
pub use api::{ApiClient, ApiError};
pub use config::{AppConfig, EnvConfig, FileConfig};
pub use mcp::context::ToolContext;
pub use mcp::registry::McpRegistry;
