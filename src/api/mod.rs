//! Client side of the remote Bedrock Server Manager HTTP API.
//!
//! The remote service owns all server state; this module only knows how to
//! authenticate against it and how to build, send, and normalize requests.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod session;

pub use client::ApiClient;
pub use endpoint::Endpoint;
pub use error::ApiError;
pub use session::SessionManager;
