#![allow(clippy::unwrap_used)]
// End-to-end cache semantics: one fetch, many subscribers, no duplicate
// network calls, and stale-but-available state on failure.

use std::sync::Arc;

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cohortal_api::{ApiClient, TokenStore};
use cohortal_core::services::ContentService;
use cohortal_core::CoreError;

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ContentService) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let api = Arc::new(ApiClient::with_client(
        reqwest::Client::new(),
        base_url,
        TokenStore::new(),
    ));
    (server, ContentService::new(api))
}

fn navigation_body() -> serde_json::Value {
    json!([
        { "title": "Help", "targetUrl": "https://help.example.org" },
        { "title": "Imprint", "targetUrl": "https://example.org/imprint" }
    ])
}

// ── Replay-one / broadcast semantics ────────────────────────────────

#[tokio::test]
async fn one_fetch_serves_early_and_late_subscribers() {
    let (server, content) = setup().await;

    // `.expect(1)` makes wiremock verify on drop that the second
    // subscription did not cause another network call.
    Mock::given(method("GET"))
        .and(path("/api/content/navigation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(navigation_body()))
        .expect(1)
        .mount(&server)
        .await;

    let mut early = content.navigation();
    assert!(early.current().is_none());

    let fetched = content.fetch_navigation().await.unwrap();
    assert_eq!(fetched.len(), 2);

    // Early subscriber observes the broadcast...
    let seen = early.changed().await.unwrap().unwrap();
    assert_eq!(seen, fetched);

    // ...and a late subscriber replays the same value as its first
    // observation, without further I/O.
    let late = content.navigation();
    assert_eq!(late.current(), Some(&fetched));
}

#[tokio::test]
async fn subscribing_never_issues_a_network_call() {
    let (server, content) = setup().await;

    // No mock mounted: any request would 404 and the test would still
    // pass only because no request is ever made.
    let sub = content.navigation();
    assert!(sub.current().is_none());
    assert!(sub.latest().is_none());

    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

// ── Failure semantics ───────────────────────────────────────────────

#[tokio::test]
async fn failed_fetch_keeps_last_good_value() {
    let (server, content) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/content/navigation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(navigation_body()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/content/navigation"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let good = content.fetch_navigation().await.unwrap();

    let result = content.fetch_navigation().await;
    assert!(matches!(
        result,
        Err(CoreError::Remote {
            status: Some(500),
            ..
        })
    ));

    // A subscriber attaching after the failure still sees the last good
    // value as its first observation.
    let sub = content.navigation();
    assert_eq!(sub.current(), Some(&good));
}

#[tokio::test]
async fn failed_first_fetch_leaves_cell_uninitialized() {
    let (server, content) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/content/metrics"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let result = content.fetch_metrics().await;
    assert!(result.is_err());
    assert!(content.metrics().current().is_none());
}

// ── Update semantics ────────────────────────────────────────────────

#[tokio::test]
async fn update_publishes_the_submitted_payload() {
    let (server, content) = setup().await;

    // The write endpoint answers with a text body; the submitted payload
    // is the value of record.
    Mock::given(method("POST"))
        .and(path("/api/content/navigation"))
        .respond_with(ResponseTemplate::new(200).set_body_string("2 links saved"))
        .mount(&server)
        .await;

    let links = vec![cohortal_core::NavigationLink {
        title: "Help".into(),
        target_url: "https://help.example.org".into(),
    }];

    let sub = content.navigation();
    let stored = content.update_navigation(links.clone()).await.unwrap();

    assert_eq!(*stored, links);
    assert_eq!(sub.latest(), Some(stored));
}

#[tokio::test]
async fn failed_update_does_not_mutate_state() {
    let (server, content) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/content/navigation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(navigation_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/content/navigation"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let good = content.fetch_navigation().await.unwrap();

    let result = content
        .update_navigation(vec![cohortal_core::NavigationLink {
            title: "Evil".into(),
            target_url: "https://example.org".into(),
        }])
        .await;
    assert!(result.is_err());

    assert_eq!(content.navigation().current(), Some(&good));
}
