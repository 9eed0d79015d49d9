//! MCP (Model Context Protocol) Server
//!
//! Exposes the remote Bedrock Server Manager API as tools an assistant host
//! can invoke. Each tool is a stateless request/response round trip against
//! the remote service.
//!
//! ## Architecture
//!
//! - Transport: newline-delimited JSON-RPC over stdin/stdout
//! - Auth: handled transparently against the remote API, not the host
//! - Tools: one per remote capability, table-driven via endpoint descriptors

pub mod context;
pub mod handler;
pub mod protocol;
pub mod registry;

pub use context::ToolContext;
pub use handler::{handle_message, run_stdio_server, HostSession};
pub use protocol::{McpError, McpRequest, McpResponse};
pub use registry::McpRegistry;
