//! MCP Tool Execution Context
//!
//! The single dependency handed to tool handlers: the authenticated client
//! for the remote manager. Tool invocations keep no other cross-call state.

use std::sync::Arc;

use crate::api::ApiClient;

/// Context provided to tool handlers during execution
#[derive(Clone)]
pub struct ToolContext {
    /// Authenticated client for the remote Bedrock Server Manager API
    pub client: Arc<ApiClient>,
}

impl ToolContext {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}
