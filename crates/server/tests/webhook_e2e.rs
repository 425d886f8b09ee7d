//! End-to-end webhook tests: a real TCP listener, driven with reqwest.

mod common;

use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;

use fraggate_core::{GateConfig, STEAM64_OFFSET};
use fraggate_server::{create_router, SharedState};

use common::{test_state, MockBackend, MockConsole};

static PORT_COUNTER: AtomicU16 = AtomicU16::new(19300);

fn next_port() -> u16 {
    PORT_COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Test harness binding the router to a local port.
struct TestHarness {
    logs_url: String,
    state: SharedState,
    backend: Arc<MockBackend>,
    console: Arc<MockConsole>,
    http: reqwest::Client,
}

impl TestHarness {
    async fn new(config: GateConfig) -> Self {
        let (state, backend, console) = test_state(config);
        let router = create_router(state.clone());

        let port = next_port();
        let listener = TcpListener::bind(("127.0.0.1", port))
            .await
            .expect("bind test listener");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve");
        });

        Self {
            logs_url: format!("http://127.0.0.1:{port}/logs"),
            state,
            backend,
            console,
            http: reqwest::Client::new(),
        }
    }

    async fn post_text(&self, token: Option<&str>, body: &str) -> reqwest::Response {
        let mut req = self.http.post(&self.logs_url).body(body.to_string());
        if let Some(token) = token {
            req = req.query(&[("token", token)]);
        }
        req.send().await.expect("request")
    }
}

fn config() -> GateConfig {
    let mut config = GateConfig::default();
    config.verify_url = "https://hub.example/verify".to_string();
    config
}

#[tokio::test]
async fn missing_or_wrong_token_is_forbidden() {
    let harness = TestHarness::new(config().with_shared_token("hunter2")).await;

    let resp = harness.post_text(None, "anything").await;
    assert_eq!(resp.status(), 403);
    assert_eq!(resp.text().await.unwrap(), "forbidden");

    let resp = harness.post_text(Some("wrong"), "anything").await;
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn matching_token_is_admitted() {
    let harness = TestHarness::new(config().with_shared_token("hunter2")).await;

    let resp = harness.post_text(Some("hunter2"), "irrelevant line").await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn empty_payload_is_ignored() {
    let harness = TestHarness::new(config()).await;

    let resp = harness.post_text(None, "").await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ignored");
}

#[tokio::test]
async fn kill_payload_awards_xp() {
    let harness = TestHarness::new(config()).await;

    let resp = harness
        .post_text(
            None,
            r#""D<3><76561198000000001><CT>" killed "V<4><76561198000000002><T>" with "awp""#,
        )
        .await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");

    let awards = harness.backend.xp_awards.lock().unwrap();
    assert_eq!(awards.len(), 1);
    assert_eq!(awards[0].0, 76561198000000001);
    assert_eq!(awards[0].1, 10);
}

#[tokio::test]
async fn backend_outage_never_changes_the_response() {
    let harness = TestHarness::new(config()).await;
    harness.backend.fail_xp.store(true, Ordering::SeqCst);

    let resp = harness
        .post_text(
            None,
            r#""D<3><76561198000000001><CT>" killed "V<4><76561198000000002><T>" with "awp""#,
        )
        .await;

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
    assert!(harness.backend.xp_awards.lock().unwrap().is_empty());
}

#[tokio::test]
async fn form_payload_is_accepted() {
    let harness = TestHarness::new(config()).await;
    let identity = 12345 * 2 + STEAM64_OFFSET;
    harness.backend.set_verified(identity, true);

    let line = r#""Player<2><STEAM_1:0:12345><>" connected, address "1.2.3.4:27005""#;
    let resp = harness
        .http
        .post(&harness.logs_url)
        .form(&[("log", line)])
        .send()
        .await
        .expect("request");

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
    assert_eq!(harness.state.sessions.last_known(identity).await, Some(2));
}

#[tokio::test]
async fn get_requests_are_served_like_posts() {
    let harness = TestHarness::new(config().with_shared_token("s")).await;

    let resp = harness
        .http
        .get(&harness.logs_url)
        .query(&[("token", "s")])
        .body("nothing interesting")
        .send()
        .await
        .expect("request");

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn unverified_connect_is_kicked_through_the_webhook() {
    let harness = TestHarness::new(config()).await;
    let identity = 500 + STEAM64_OFFSET;
    harness.backend.set_verified(identity, false);

    let resp = harness
        .post_text(
            None,
            r#""Player<7><[U:1:500]><>" connected, address "10.0.0.1:27005""#,
        )
        .await;
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "ok");

    let sent = harness.console.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].starts_with("kickid 7 "));
    drop(sent);

    // The detached outcome report lands shortly after the response.
    tokio::time::sleep(Duration::from_millis(50)).await;
    let records = harness.backend.access_records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, identity);
}
