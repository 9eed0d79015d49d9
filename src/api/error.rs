//! Error taxonomy for calls against the remote Bedrock Server Manager API.

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by the API client, one variant per failure class.
///
/// `Validation` never reaches the network. `Authentication` is fatal for the
/// call that triggered it but not for the process. `Remote` carries the
/// remote service's own status and body so the host can relay them verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid arguments: {0}")]
    Validation(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("remote API error ({status}): {message}")]
    Remote {
        status: u16,
        message: String,
        body: Value,
    },

    #[error("transport error: {0}")]
    Transport(String),
}

impl ApiError {
    /// The HTTP status of the remote failure, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport(format!("request timed out: {err}"))
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_carries_status() {
        let err = ApiError::Remote {
            status: 500,
            message: "boom".to_string(),
            body: serde_json::json!({"message": "boom"}),
        };
        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
    }
}
