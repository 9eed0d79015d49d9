//! Authenticated HTTP client for the remote Bedrock Server Manager API.
//!
//! All tool calls funnel through [`ApiClient::request`]: it attaches the
//! current credential, enforces the single retry-after-re-login rule on
//! authorization failures, and normalizes every response into either a JSON
//! payload or an [`ApiError`].

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::endpoint::Endpoint;
use super::error::ApiError;
use super::session::SessionManager;

/// Client for the remote manager. Cheap to share behind an `Arc`.
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionManager,
    debug: bool,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the remote manager, no trailing slash
    /// * `username` / `password` - Credentials for `/auth/token`
    /// * `timeout_secs` - Per-request timeout
    /// * `debug` - Emit request/response bodies to the diagnostic stream
    pub fn new(
        base_url: String,
        username: String,
        password: String,
        timeout_secs: u64,
        debug: bool,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;

        let session = SessionManager::new(http.clone(), base_url.clone(), username, password);

        Ok(Self {
            http,
            base_url,
            session,
            debug,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an authenticated request against one endpoint descriptor.
    ///
    /// A 401 response invalidates the credential, re-logs-in and retries the
    /// request exactly once; a second 401 surfaces as
    /// [`ApiError::Authentication`]. Any other non-2xx status becomes
    /// [`ApiError::Remote`] with the body passed through.
    pub async fn request(
        &self,
        endpoint: &Endpoint,
        path_params: &[&str],
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = endpoint.url(&self.base_url, path_params);

        let token = self.session.ensure_session().await?;
        let response = self.send(endpoint, &url, body, &token).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return self.normalize(&url, response).await;
        }

        // Authorization failure: force a re-login and retry exactly once.
        warn!("received 401 from {}, re-authenticating", url);
        self.session.invalidate(&token).await;
        let token = self.session.ensure_session().await?;
        let response = self.send(endpoint, &url, body, &token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Authentication(format!(
                "request to {url} still unauthorized after re-login"
            )));
        }
        self.normalize(&url, response).await
    }

    /// Call an endpoint that does not carry the credential (`/auth/logout`).
    pub async fn request_unauthenticated(
        &self,
        endpoint: &Endpoint,
        path_params: &[&str],
    ) -> Result<Value, ApiError> {
        let url = endpoint.url(&self.base_url, path_params);
        let response = self
            .http
            .request(endpoint.method.clone(), &url)
            .send()
            .await?;
        self.normalize(&url, response).await
    }

    /// Drop the locally held credential (after a remote logout).
    pub async fn drop_session(&self) {
        self.session.clear().await;
    }

    async fn send(
        &self,
        endpoint: &Endpoint,
        url: &str,
        body: Option<&Value>,
        token: &str,
    ) -> Result<Response, ApiError> {
        if self.debug {
            debug!(
                "{} {} body={}",
                endpoint.method,
                url,
                body.map(|b| b.to_string()).unwrap_or_default()
            );
        }

        let mut builder = self
            .http
            .request(endpoint.method.clone(), url)
            .bearer_auth(token);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        Ok(builder.send().await?)
    }

    /// Map a response to a payload or error, passing remote bodies through.
    async fn normalize(&self, url: &str, response: Response) -> Result<Value, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if self.debug {
            debug!("response from {}: status={} body={}", url, status, text);
        }

        if status.is_success() {
            if text.trim().is_empty() {
                // Success marker for endpoints that answer with no body.
                return Ok(json!({ "status": "success" }));
            }
            return Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)));
        }

        let body: Value = serde_json::from_str(&text).unwrap_or(Value::String(text));
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("request to {url} failed"));

        Err(ApiError::Remote {
            status: status.as_u16(),
            message,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_client() {
        let client = ApiClient::new(
            "http://localhost:11325".to_string(),
            "admin".to_string(),
            "secret".to_string(),
            30,
            false,
        );
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "http://localhost:11325");
    }
}
