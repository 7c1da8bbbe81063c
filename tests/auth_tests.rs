use std::sync::{Arc, Mutex};

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use homeboard::auth_state::{AuthState, AuthStateProvider};
use homeboard::config::Config;
use homeboard::gateway::HouseholdGateway;
use homeboard::Client;

fn gateway_for(server: &MockServer) -> Arc<HouseholdGateway> {
    let config = Config::new(&server.uri(), "test-anon-key").unwrap();
    Arc::new(HouseholdGateway::new(Client::new(&config).unwrap()))
}

fn token_response() -> serde_json::Value {
    json!({
        "access_token": "access-token",
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "refresh-token",
        "user": {
            "id": "user-1",
            "email": "casey@example.com",
            "role": "authenticated"
        }
    })
}

#[tokio::test]
async fn sign_in_stores_session_and_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(body_partial_json(json!({ "email": "casey@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response()))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    assert!(!gateway.is_authenticated());

    let session = gateway
        .sign_in("casey@example.com", "hunter2")
        .await
        .unwrap()
        .expect("session should be issued");

    assert_eq!(session.access_token, "access-token");
    assert!(gateway.is_authenticated());
    assert_eq!(gateway.current_user().unwrap().id, "user-1");
    assert_eq!(gateway.current_session().unwrap().user_id, "user-1");
}

#[tokio::test]
async fn rejected_credentials_are_an_absent_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let session = gateway.sign_in("casey@example.com", "wrong").await.unwrap();

    assert!(session.is_none());
    assert!(!gateway.is_authenticated());
}

#[tokio::test]
async fn sign_up_without_issued_session_returns_none() {
    let server = MockServer::start().await;

    // Email confirmation pending: GoTrue answers with a bare user document.
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": "user-2", "email": "new@example.com" }
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let session = gateway.sign_up("new@example.com", "hunter2").await.unwrap();

    assert!(session.is_none());
    assert!(!gateway.is_authenticated());
}

#[tokio::test]
async fn sign_out_clears_the_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    gateway.sign_in("casey@example.com", "hunter2").await.unwrap();
    assert!(gateway.is_authenticated());

    gateway.sign_out().await.unwrap();
    assert!(!gateway.is_authenticated());
    assert!(gateway.current_session().is_none());
}

#[tokio::test]
async fn sign_out_without_session_is_a_no_op() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    gateway.sign_out().await.unwrap();
}

#[tokio::test]
async fn initialize_fails_against_unreachable_project() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/settings"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let config = Config::new(&server.uri(), "test-anon-key").unwrap();
    let client = Client::new(&config).unwrap();
    assert!(client.initialize().await.is_err());
}

#[tokio::test]
async fn anonymous_state_carries_no_principal() {
    let server = MockServer::start().await;
    let provider = AuthStateProvider::new(gateway_for(&server));

    let state = provider.current_state();
    assert!(!state.is_authenticated());
    assert!(state.principal().is_none());
}

#[tokio::test]
async fn authenticated_state_carries_identity_claims() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response()))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    gateway.sign_in("casey@example.com", "hunter2").await.unwrap();

    let provider = AuthStateProvider::new(gateway);
    let state = provider.current_state();
    let principal = state.principal().expect("should be authenticated");

    assert_eq!(principal.subject, "user-1");
    assert_eq!(principal.email, "casey@example.com");
    assert_eq!(principal.display_name, "casey@example.com");
}

#[tokio::test]
async fn notify_changed_broadcasts_to_subscribers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response()))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let provider = AuthStateProvider::new(gateway.clone());

    let seen: Arc<Mutex<Vec<AuthState>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    provider.subscribe(move |state| sink.lock().unwrap().push(state.clone()));

    provider.notify_changed();
    gateway.sign_in("casey@example.com", "hunter2").await.unwrap();
    provider.notify_changed();

    let states = seen.lock().unwrap();
    assert_eq!(states.len(), 2);
    assert!(!states[0].is_authenticated());
    assert!(states[1].is_authenticated());
}

#[tokio::test]
async fn rate_limited_sign_in_propagates_as_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": "over_request_rate_limit"
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let err = gateway
        .sign_in("casey@example.com", "hunter2")
        .await
        .unwrap_err();

    assert!(matches!(err, homeboard::error::Error::Api { status: 429, .. }));
    assert!(!gateway.is_authenticated());
}

#[tokio::test]
async fn unauthorized_sign_in_is_an_absent_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    let session = gateway.sign_in("casey@example.com", "wrong").await.unwrap();
    assert!(session.is_none());
}
