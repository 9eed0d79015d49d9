//! Common test infrastructure
//!
//! Spawns a mock remote manager on a random port. The mock implements the
//! form-encoded token login, checks bearer credentials on API routes, and
//! exposes knobs for injecting authentication failures so the re-login
//! behavior can be exercised end to end.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use bedrock_mcp::api::ApiClient;

pub const TEST_USER: &str = "admin";
pub const TEST_PASS: &str = "secret";

#[derive(Default)]
struct MockState {
    logins: AtomicUsize,
    api_requests: AtomicUsize,
    token_counter: AtomicUsize,
    current_token: Mutex<Option<String>>,
    fail_login: AtomicBool,
    always_unauthorized: AtomicBool,
}

/// Mock remote manager instance bound to a random port.
///
/// When dropped, the server task is aborted.
pub struct MockManager {
    /// Base URL for the client under test (e.g. "http://127.0.0.1:12345")
    pub base_url: String,

    state: Arc<MockState>,
    server_task: Option<tokio::task::JoinHandle<()>>,
}

impl Drop for MockManager {
    fn drop(&mut self) {
        if let Some(task) = &self.server_task {
            task.abort();
        }
    }
}

impl MockManager {
    /// Spawns a new mock manager on a random port.
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/auth/token", post(login))
            .route("/auth/logout", get(logout))
            .route("/api/servers", get(list_servers))
            .route("/api/server/{name}/start", post(start_server))
            .route("/api/server/{name}/allowlist/add", post(allowlist_add))
            .route("/api/downloads/prune", post(prune_downloads))
            .route("/api/themes", get(themes))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().expect("Failed to get local address");

        let server_task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server died");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            server_task: Some(server_task),
        }
    }

    /// Tear the mock down and wait until its port stops accepting
    /// connections, so subsequent requests are refused.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.server_task.take() {
            task.abort();
            let _ = task.await;
        }
    }

    /// An [`ApiClient`] pointed at this mock with the valid credentials.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(
            self.base_url.clone(),
            TEST_USER.to_string(),
            TEST_PASS.to_string(),
            5,
            false,
        )
        .expect("Failed to build client")
    }

    /// Number of login attempts received so far.
    pub fn login_count(&self) -> usize {
        self.state.logins.load(Ordering::SeqCst)
    }

    /// Number of authenticated API requests received so far.
    pub fn api_request_count(&self) -> usize {
        self.state.api_requests.load(Ordering::SeqCst)
    }

    /// Invalidate the currently issued credential. The next login issues a
    /// fresh one.
    pub fn expire_token(&self) {
        *self.state.current_token.lock().unwrap() = None;
    }

    /// Make all subsequent login attempts fail with 401.
    pub fn set_fail_login(&self, fail: bool) {
        self.state.fail_login.store(fail, Ordering::SeqCst);
    }

    /// Make all API routes answer 401 even for valid credentials.
    pub fn set_always_unauthorized(&self, unauthorized: bool) {
        self.state
            .always_unauthorized
            .store(unauthorized, Ordering::SeqCst);
    }
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn login(State(state): State<Arc<MockState>>, Form(form): Form<LoginForm>) -> Response {
    state.logins.fetch_add(1, Ordering::SeqCst);

    if state.fail_login.load(Ordering::SeqCst)
        || form.username != TEST_USER
        || form.password != TEST_PASS
    {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Bad credentials"})),
        )
            .into_response();
    }

    let n = state.token_counter.fetch_add(1, Ordering::SeqCst) + 1;
    let token = format!("token-{n}");
    *state.current_token.lock().unwrap() = Some(token.clone());

    Json(json!({"access_token": token, "token_type": "bearer"})).into_response()
}

async fn logout() -> Json<Value> {
    Json(json!({"message": "Logged out"}))
}

/// Checks the bearer credential. Counts every API request, authorized or not.
fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    state.api_requests.fetch_add(1, Ordering::SeqCst);

    let expected = state.current_token.lock().unwrap().clone();
    let presented = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let valid = !state.always_unauthorized.load(Ordering::SeqCst)
        && matches!((expected.as_deref(), presented), (Some(e), Some(p)) if e == p);

    if valid {
        Ok(())
    } else {
        Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthorized"})),
        )
            .into_response())
    }
}

async fn list_servers(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    Json(json!({
        "servers": [
            {"name": "survival", "status": "RUNNING"},
            {"name": "creative", "status": "STOPPED"}
        ]
    }))
    .into_response()
}

async fn start_server(
    State(state): State<Arc<MockState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    Json(json!({"status": "running", "server": name})).into_response()
}

async fn allowlist_add(
    State(state): State<Arc<MockState>>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    Json(json!({"message": "Players added", "server": name, "received": body})).into_response()
}

async fn prune_downloads(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "disk failure", "status": "error"})),
    )
        .into_response()
}

async fn themes(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    // 200 with no body at all
    StatusCode::OK.into_response()
}
