//! Session lifecycle for the remote API.
//!
//! The remote manager authenticates with a JWT bearer token obtained from
//! `/auth/token` (form-encoded credentials). This module owns the single live
//! credential for the process: callers obtain it through [`ensure_session`]
//! and report it stale through [`invalidate`]. The credential lives behind an
//! `RwLock` so concurrent requests read it freely while a refresh replaces it
//! atomically; no lock is ever held across a network call.
//!
//! [`ensure_session`]: SessionManager::ensure_session
//! [`invalidate`]: SessionManager::invalidate

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::endpoint;
use super::error::ApiError;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Owns the authenticated session with the remote manager.
pub struct SessionManager {
    http: Client,
    base_url: String,
    username: String,
    password: String,
    token: RwLock<Option<Arc<str>>>,
}

impl SessionManager {
    pub fn new(http: Client, base_url: String, username: String, password: String) -> Self {
        Self {
            http,
            base_url,
            username,
            password,
            token: RwLock::new(None),
        }
    }

    /// Return the current credential, logging in first if none is held.
    ///
    /// Fails with [`ApiError::Authentication`] if the login request itself
    /// fails: bad credentials, network failure, or a non-2xx response.
    pub async fn ensure_session(&self) -> Result<Arc<str>, ApiError> {
        if let Some(token) = self.token.read().await.clone() {
            return Ok(token);
        }
        self.login().await
    }

    /// Drop the held credential if it is still the one the caller saw.
    ///
    /// Comparing against `stale` means a request that raced with a refresh
    /// cannot clobber the newer credential another call just obtained.
    pub async fn invalidate(&self, stale: &str) {
        let mut guard = self.token.write().await;
        if guard.as_deref() == Some(stale) {
            debug!("invalidating session token");
            *guard = None;
        }
    }

    /// Drop the held credential unconditionally (used after remote logout).
    pub async fn clear(&self) {
        *self.token.write().await = None;
    }

    async fn login(&self) -> Result<Arc<str>, ApiError> {
        let url = endpoint::LOGIN.url(&self.base_url, &[]);
        debug!("logging in to {}", url);

        let response = self
            .http
            .post(&url)
            .form(&[
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Authentication(format!("login request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Authentication(format!(
                "login rejected with status {status}: {body}"
            )));
        }

        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Authentication(format!("malformed login response: {e}")))?;

        let token = parsed
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ApiError::Authentication("login response carried no access token".to_string())
            })?;

        let token: Arc<str> = token.into();
        *self.token.write().await = Some(token.clone());
        info!("authenticated with remote manager");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_session() -> SessionManager {
        SessionManager::new(
            Client::new(),
            "http://127.0.0.1:9".to_string(),
            "admin".to_string(),
            "secret".to_string(),
        )
    }

    #[tokio::test]
    async fn test_invalidate_clears_matching_token() {
        let session = make_session();
        *session.token.write().await = Some("tok-1".into());

        session.invalidate("tok-1").await;
        assert!(session.token.read().await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_keeps_newer_token() {
        let session = make_session();
        *session.token.write().await = Some("tok-2".into());

        // A caller still holding tok-1 reports it stale; tok-2 must survive.
        session.invalidate("tok-1").await;
        assert_eq!(session.token.read().await.as_deref(), Some("tok-2"));
    }

    #[tokio::test]
    async fn test_ensure_session_returns_held_token_without_login() {
        let session = make_session();
        *session.token.write().await = Some("tok-3".into());

        // base_url points at a closed port, so reaching the network would fail.
        let token = session.ensure_session().await.unwrap();
        assert_eq!(&*token, "tok-3");
    }

    #[tokio::test]
    async fn test_ensure_session_unreachable_is_authentication_error() {
        let session = make_session();
        let err = session.ensure_session().await.unwrap_err();
        assert!(matches!(err, ApiError::Authentication(_)));
    }
}
