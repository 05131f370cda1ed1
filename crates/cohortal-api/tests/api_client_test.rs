#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` and `AuthClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cohortal_api::transport::TransportConfig;
use cohortal_api::{ApiClient, AuthClient, Error, TokenStore};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApiClient::with_client(reqwest::Client::new(), base_url, TokenStore::new());
    (server, client)
}

async fn setup_auth() -> (MockServer, AuthClient) {
    let server = MockServer::start().await;
    let issuer = Url::parse(&format!("{}/realms/cohortal", server.uri())).unwrap();
    let client = AuthClient::new(
        issuer,
        "cohortal".into(),
        TokenStore::new(),
        &TransportConfig::default(),
    )
    .unwrap();
    (server, client)
}

fn token_body() -> serde_json::Value {
    json!({
        "access_token": "header.payload.signature",
        "refresh_token": "refresh-opaque",
        "expires_in": 300,
        "token_type": "Bearer"
    })
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_stores_tokens() {
    let (server, client) = setup_auth().await;

    Mock::given(method("POST"))
        .and(path("/realms/cohortal/protocol/openid-connect/token"))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .mount(&server)
        .await;

    let secret: SecretString = "test-password".to_owned().into();
    client.login("researcher", &secret).await.unwrap();

    assert!(client.tokens().is_logged_in());
}

#[tokio::test]
async fn test_login_failure() {
    let (server, client) = setup_auth().await;

    Mock::given(method("POST"))
        .and(path("/realms/cohortal/protocol/openid-connect/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid user credentials"
        })))
        .mount(&server)
        .await;

    let secret: SecretString = "wrong-password".to_owned().into();
    let result = client.login("researcher", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
    assert!(!client.tokens().is_logged_in());
}

#[tokio::test]
async fn test_refresh_without_session_fails() {
    let (_server, client) = setup_auth().await;

    let result = client.refresh().await;
    assert!(matches!(result, Err(Error::NotLoggedIn)));
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let (server, client) = setup_auth().await;

    Mock::given(method("POST"))
        .and(path("/realms/cohortal/protocol/openid-connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .mount(&server)
        .await;

    let secret: SecretString = "test-password".to_owned().into();
    client.login("researcher", &secret).await.unwrap();
    client.refresh().await.unwrap();

    assert!(client.tokens().is_logged_in());
}

#[tokio::test]
async fn test_logout_clears_local_session_even_when_issuer_fails() {
    let (server, client) = setup_auth().await;

    Mock::given(method("POST"))
        .and(path("/realms/cohortal/protocol/openid-connect/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/realms/cohortal/protocol/openid-connect/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let secret: SecretString = "test-password".to_owned().into();
    client.login("researcher", &secret).await.unwrap();

    // Remote call succeeds at the transport level (a 500 is still a response),
    // and the local store must be cleared regardless.
    let _ = client.logout().await;
    assert!(!client.tokens().is_logged_in());
}

// ── Content tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_get_navigation() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/content/navigation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "title": "Help", "targetUrl": "https://help.example.org" },
            { "title": "Imprint", "targetUrl": "https://example.org/imprint" }
        ])))
        .mount(&server)
        .await;

    let links = client.get_navigation().await.unwrap();

    assert_eq!(links.len(), 2);
    assert_eq!(links[0].title, "Help");
    assert_eq!(links[1].target_url, "https://example.org/imprint");
}

#[tokio::test]
async fn test_update_navigation_accepts_text_response() {
    let (server, client) = setup().await;

    // The backend answers content writes with a bare text body.
    Mock::given(method("POST"))
        .and(path("/api/content/navigation"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let links = vec![cohortal_api::models::NavigationLinkDto {
        title: "Help".into(),
        target_url: "https://help.example.org".into(),
    }];
    client.update_navigation(&links).await.unwrap();
}

#[tokio::test]
async fn test_get_metrics() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/content/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "aqls": 12, "projects": 4, "organizations": 2
        })))
        .mount(&server)
        .await;

    let metrics = client.get_metrics().await.unwrap();
    assert_eq!(metrics.aqls, 12);
    assert_eq!(metrics.projects, 4);
}

// ── AQL tests ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_aqls() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/aql"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 7,
            "name": "SOFA scores",
            "query": "SELECT c FROM COMPOSITION c",
            "purpose": "Scoring",
            "use": "Daily review",
            "publicAql": true,
            "owner": { "id": "user-1", "firstName": "Ada", "lastName": "Lovelace" }
        }])))
        .mount(&server)
        .await;

    let aqls = client.get_aqls().await.unwrap();

    assert_eq!(aqls.len(), 1);
    assert_eq!(aqls[0].id, Some(7));
    assert_eq!(aqls[0].usage.as_deref(), Some("Daily review"));
    assert!(aqls[0].public_aql);
    assert_eq!(aqls[0].owner.as_ref().unwrap().id, "user-1");
}

#[tokio::test]
async fn test_validate_aql_reports_position_as_strings() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/aqleditor/validate"))
        .and(body_string_contains("SELECT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "valid": false,
            "message": "unexpected token",
            "startLine": "3",
            "startColumn": "14"
        })))
        .mount(&server)
        .await;

    let verdict = client.validate_aql("SELECT broken").await.unwrap();

    assert!(!verdict.valid);
    assert_eq!(verdict.start_line.as_deref(), Some("3"));
    assert_eq!(verdict.start_column.as_deref(), Some("14"));
}

#[tokio::test]
async fn test_delete_aql_maps_missing_session() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/aql/9"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.delete_aql(9).await;
    assert!(matches!(result, Err(Error::Authentication { .. })));
}

// ── User administration tests ───────────────────────────────────────

#[tokio::test]
async fn test_get_users_filters_by_approval() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/admin/user"))
        .and(query_param("approved", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "pending-1",
            "firstName": "Grace",
            "lastName": "Hopper",
            "createdTimestamp": 1718445000000i64,
            "roles": [],
            "approved": false
        }])))
        .mount(&server)
        .await;

    let users = client.get_users(false).await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, "pending-1");
    assert!(!users[0].approved);
}

#[tokio::test]
async fn test_api_error_carries_status_and_body_preview() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/project"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let result = client.get_projects().await;
    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("database unavailable"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}
