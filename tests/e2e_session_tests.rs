//! End-to-end tests for session handling against a mock remote manager
//!
//! Covers credential reuse, re-login after an authorization failure, and the
//! normalization of remote and transport errors.

mod common;

use common::{MockManager, TEST_USER};

use bedrock_mcp::api::{endpoint, ApiClient, ApiError};

#[tokio::test]
async fn test_login_happens_once_for_many_requests() {
    let manager = MockManager::spawn().await;
    let client = manager.client();

    client
        .request(&endpoint::SERVERS, &[], None)
        .await
        .unwrap();
    client
        .request(&endpoint::SERVERS, &[], None)
        .await
        .unwrap();
    client
        .request(&endpoint::SERVER_START, &["survival"], None)
        .await
        .unwrap();

    assert_eq!(manager.login_count(), 1);
    assert_eq!(manager.api_request_count(), 3);
}

#[tokio::test]
async fn test_expired_token_triggers_one_relogin_and_retry() {
    let manager = MockManager::spawn().await;
    let client = manager.client();

    client
        .request(&endpoint::SERVERS, &[], None)
        .await
        .unwrap();
    assert_eq!(manager.login_count(), 1);

    manager.expire_token();

    let payload = client
        .request(&endpoint::SERVER_START, &["survival"], None)
        .await
        .unwrap();
    assert_eq!(payload["status"], "running");

    // One extra login, and the rejected call plus its retry on the wire.
    assert_eq!(manager.login_count(), 2);
    assert_eq!(manager.api_request_count(), 3);
}

#[tokio::test]
async fn test_persistent_unauthorized_is_authentication_error() {
    let manager = MockManager::spawn().await;
    let client = manager.client();

    client
        .request(&endpoint::SERVERS, &[], None)
        .await
        .unwrap();

    manager.set_always_unauthorized(true);

    let err = client
        .request(&endpoint::SERVERS, &[], None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Authentication(_)));

    // Re-login happened, but the retry was not repeated after the second 401.
    assert_eq!(manager.login_count(), 2);
    assert_eq!(manager.api_request_count(), 3);
}

#[tokio::test]
async fn test_bad_credentials_fail_login() {
    let manager = MockManager::spawn().await;
    let client = ApiClient::new(
        manager.base_url.clone(),
        TEST_USER.to_string(),
        "wrong_password".to_string(),
        5,
        false,
    )
    .unwrap();

    let err = client
        .request(&endpoint::SERVERS, &[], None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Authentication(_)));
    assert_eq!(manager.api_request_count(), 0);
}

#[tokio::test]
async fn test_failed_relogin_surfaces_authentication_error() {
    let manager = MockManager::spawn().await;
    let client = manager.client();

    client
        .request(&endpoint::SERVERS, &[], None)
        .await
        .unwrap();

    manager.expire_token();
    manager.set_fail_login(true);

    let err = client
        .request(&endpoint::SERVERS, &[], None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Authentication(_)));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Bind and immediately drop a listener to get a port nobody serves.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(
        format!("http://{addr}"),
        TEST_USER.to_string(),
        "secret".to_string(),
        5,
        false,
    )
    .unwrap();

    let err = client
        .request(&endpoint::SERVERS, &[], None)
        .await
        .unwrap_err();
    // Login itself cannot reach the host.
    assert!(matches!(
        err,
        ApiError::Authentication(_) | ApiError::Transport(_)
    ));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_unreachable_remote_after_login_is_transport_error() {
    let manager = MockManager::spawn().await;
    let client = manager.client();

    client
        .request(&endpoint::SERVERS, &[], None)
        .await
        .unwrap();

    // The credential is held, so the next call skips login and hits the
    // network directly; the port now refuses connections.
    manager.shutdown().await;

    let err = client
        .request(&endpoint::SERVERS, &[], None)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_empty_success_body_becomes_status_marker() {
    let manager = MockManager::spawn().await;
    let client = manager.client();

    let payload = client
        .request(&endpoint::THEMES_GET, &[], None)
        .await
        .unwrap();
    assert_eq!(payload, serde_json::json!({"status": "success"}));
}

#[tokio::test]
async fn test_remote_error_passes_body_through() {
    let manager = MockManager::spawn().await;
    let client = manager.client();

    let err = client
        .request(&endpoint::DOWNLOADS_PRUNE, &[], None)
        .await
        .unwrap_err();

    match err {
        ApiError::Remote {
            status,
            message,
            body,
        } => {
            assert_eq!(status, 500);
            assert_eq!(message, "disk failure");
            assert_eq!(body["status"], "error");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_logout_drops_credential_and_next_call_relogs_in() {
    let manager = MockManager::spawn().await;
    let client = manager.client();

    client
        .request(&endpoint::SERVERS, &[], None)
        .await
        .unwrap();
    assert_eq!(manager.login_count(), 1);

    client
        .request_unauthenticated(&endpoint::LOGOUT, &[])
        .await
        .unwrap();
    client.drop_session().await;

    client
        .request(&endpoint::SERVERS, &[], None)
        .await
        .unwrap();
    assert_eq!(manager.login_count(), 2);
}
