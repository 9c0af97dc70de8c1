use nindotx_auth::{AuthController, AuthError, AuthOptions, AuthState};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn alice_response() -> serde_json::Value {
    json!({
        "id": 1,
        "username": "alice",
        "email": "alice@x.com",
        "firstName": "Alice",
        "lastName": "A",
        "gender": "female",
        "image": "http://x/img.png",
        "accessToken": "tok1",
        "refreshToken": "tok2"
    })
}

fn controller_for(server: &MockServer) -> AuthController {
    let options = AuthOptions::default().with_login_url(&format!("{}/auth/login", server.uri()));
    AuthController::new(options)
}

#[tokio::test]
async fn test_login_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "username": "alice",
            "password": "wonderland",
            "expiresInMins": 30
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = controller_for(&mock_server);
    let outcome = controller.login("alice", "wonderland").await.unwrap();

    let state = controller.state();
    assert_eq!(state, outcome);
    let response = state.response().expect("expected success");
    assert_eq!(response.id, 1);
    assert_eq!(response.username, "alice");
    assert_eq!(response.email, "alice@x.com");
    assert_eq!(response.first_name, "Alice");
    assert_eq!(response.last_name, "A");
    assert_eq!(response.gender, "female");
    assert_eq!(response.image, "http://x/img.png");
    assert_eq!(response.access_token, "tok1");
    assert_eq!(response.refresh_token, "tok2");
}

#[tokio::test]
async fn test_login_ignores_unknown_response_fields() {
    let mock_server = MockServer::start().await;

    let mut body = alice_response();
    body["maidenName"] = json!("Smith");
    body["address"] = json!({"city": "Phoenix"});

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let controller = controller_for(&mock_server);
    controller.login("alice", "wonderland").await.unwrap();

    assert_eq!(
        controller.state().response().map(|r| r.username.clone()),
        Some("alice".to_string())
    );
}

#[tokio::test]
async fn test_loading_is_published_before_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(alice_response())
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let controller = Arc::new(controller_for(&mock_server));
    let mut changes = controller.subscribe();
    assert_eq!(controller.state(), AuthState::Idle);

    let handle = controller.spawn_login("alice", "wonderland");

    assert_eq!(changes.recv().await.unwrap(), AuthState::Loading);
    assert_eq!(controller.state(), AuthState::Loading);

    let outcome = handle.await.unwrap().unwrap();
    assert!(matches!(outcome, AuthState::Success(_)));
    assert!(matches!(changes.recv().await.unwrap(), AuthState::Success(_)));
}

#[tokio::test]
async fn test_login_unauthorized_sets_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Invalid credentials"
        })))
        .mount(&mock_server)
        .await;

    let controller = controller_for(&mock_server);
    let outcome = controller.login("alice", "wrong").await.unwrap();

    let message = outcome.error_message().expect("expected error").to_string();
    assert!(message.contains("401"));
    assert!(message.contains("Invalid credentials"));
    assert_eq!(controller.state(), outcome);
}

#[tokio::test]
async fn test_login_truncated_body_sets_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{"id":1,"username":"ali"#, "application/json"),
        )
        .mount(&mock_server)
        .await;

    let controller = controller_for(&mock_server);
    controller.login("alice", "wonderland").await.unwrap();

    let state = controller.state();
    assert!(!state.error_message().expect("expected error").is_empty());
}

#[tokio::test]
async fn test_login_connection_refused_sets_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let options = AuthOptions::default().with_login_url(&format!("http://{}/auth/login", addr));
    let controller = AuthController::new(options);
    controller.login("alice", "wonderland").await.unwrap();

    let state = controller.state();
    assert!(!state.error_message().expect("expected error").is_empty());
}

#[tokio::test]
async fn test_login_timeout_sets_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(alice_response())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let options = AuthOptions::default()
        .with_login_url(&format!("{}/auth/login", mock_server.uri()))
        .with_request_timeout(Some(Duration::from_millis(100)));
    let controller = AuthController::new(options);
    controller.login("alice", "wonderland").await.unwrap();

    assert!(controller.state().error_message().is_some());
}

#[tokio::test]
async fn test_custom_expiry_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "username": "alice",
            "password": "wonderland",
            "expiresInMins": 5
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = AuthOptions::default()
        .with_login_url(&format!("{}/auth/login", mock_server.uri()))
        .with_expires_in_mins(5);
    let controller = AuthController::new(options);
    controller.login("alice", "wonderland").await.unwrap();

    assert!(matches!(controller.state(), AuthState::Success(_)));
}

#[tokio::test]
async fn test_bad_request_then_reset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&mock_server)
        .await;

    let controller = controller_for(&mock_server);
    let mut changes = controller.subscribe();

    controller.login("alice", "wonderland").await.unwrap();
    assert!(!controller.state().error_message().unwrap().is_empty());

    controller.reset_state();
    assert_eq!(controller.state(), AuthState::Idle);

    assert_eq!(changes.recv().await.unwrap(), AuthState::Loading);
    assert!(matches!(changes.recv().await.unwrap(), AuthState::Error(_)));
    assert_eq!(changes.recv().await.unwrap(), AuthState::Idle);
}

#[test]
fn test_reset_from_idle_is_noop() {
    let controller = AuthController::default();
    controller.reset_state();
    assert_eq!(controller.state(), AuthState::Idle);
}

#[tokio::test]
async fn test_reset_after_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice_response()))
        .mount(&mock_server)
        .await;

    let controller = controller_for(&mock_server);
    controller.login("alice", "wonderland").await.unwrap();
    assert!(controller.state().is_terminal());

    controller.reset_state();
    assert_eq!(controller.state(), AuthState::Idle);
}

#[tokio::test]
async fn test_reset_while_loading_discards_outcome() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(alice_response())
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let controller = Arc::new(controller_for(&mock_server));
    let mut changes = controller.subscribe();
    let handle = controller.spawn_login("alice", "wonderland");

    assert_eq!(changes.recv().await.unwrap(), AuthState::Loading);
    controller.reset_state();
    assert_eq!(controller.state(), AuthState::Idle);

    let outcome = handle.await.unwrap().unwrap();
    assert!(matches!(outcome, AuthState::Success(_)));
    assert_eq!(controller.state(), AuthState::Idle);
}

#[tokio::test]
async fn test_login_rejected_unless_idle() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(alice_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = controller_for(&mock_server);
    controller.login("alice", "wonderland").await.unwrap();

    let result = controller.login("alice", "wonderland").await;
    assert!(matches!(result, Err(AuthError::NotIdle(AuthState::Success(_)))));
    assert!(matches!(controller.state(), AuthState::Success(_)));
}

#[tokio::test]
async fn test_second_login_while_loading_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(alice_response())
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = Arc::new(controller_for(&mock_server));
    let mut changes = controller.subscribe();
    let handle = controller.spawn_login("alice", "wonderland");
    assert_eq!(changes.recv().await.unwrap(), AuthState::Loading);

    let second = controller.login("alice", "wonderland").await;
    assert!(matches!(second, Err(AuthError::NotIdle(AuthState::Loading))));

    handle.await.unwrap().unwrap();
    assert!(matches!(controller.state(), AuthState::Success(_)));
}
