//! End-to-end flow: context construction, bridge attach, UI events, and
//! teardown against a mock portal API.

use std::sync::Arc;
use std::time::Duration;

use campustrace_bridge::{TelemetryContext, UiEvent};
use campustrace_domain::{ApiConfig, ClientInfo, DeliveryConfig, TelemetryConfig, UserIdentity};
use campustrace_infra::SessionTokenProvider;
use tokio::sync::mpsc;
use tokio::time::sleep;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> TelemetryConfig {
    TelemetryConfig {
        api: ApiConfig { base_url: server.uri(), timeout_seconds: 5 },
        delivery: DeliveryConfig { queue_capacity: 64, drain_timeout_seconds: 2 },
    }
}

fn context_for(server: &MockServer) -> TelemetryContext {
    TelemetryContext::new(
        &config_for(server),
        Arc::new(SessionTokenProvider::with_token("session-token")),
        UserIdentity::new("u1", "u1@example.edu", "Avery"),
        ClientInfo { browser: Some("firefox".into()), ..Default::default() },
    )
    .unwrap()
}

async fn mount_happy_portal(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/activity/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "pageViews": true,
            "buttonClicks": true,
            "formSubmissions": true,
            "apiCalls": true,
            "loginLogout": true,
            "formInputs": true,
            "visitTime": true,
            "updatedAt": "2026-01-15T10:30:00Z",
        })))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/activity"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/activity/visits"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/activity/visits/end"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_session_flow_reaches_every_endpoint() {
    let server = MockServer::start().await;
    mount_happy_portal(&server).await;

    let context = context_for(&server);
    let (tx, rx) = mpsc::channel(16);

    context.bridge.attach(rx).await.unwrap();

    tx.send(UiEvent::LoggedIn { student_id: "u1".into() }).await.unwrap();
    tx.send(UiEvent::RouteChanged { path: "/dashboard".into() }).await.unwrap();
    tx.send(UiEvent::ButtonClicked { element_id: "enroll".into(), path: "/dashboard".into() })
        .await
        .unwrap();
    tx.send(UiEvent::RouteChanged { path: "/grades".into() }).await.unwrap();
    tx.send(UiEvent::LoggedOut { student_id: "u1".into() }).await.unwrap();
    drop(tx);

    sleep(Duration::from_millis(100)).await;
    context.shutdown().await;

    let requests = server.received_requests().await.unwrap();
    let count = |m: &str, p: &str| {
        requests.iter().filter(|r| r.method.as_str() == m && r.url.path() == p).count()
    };

    assert_eq!(count("GET", "/activity/config"), 1);
    // login + 2 page views + button click + logout
    assert_eq!(count("POST", "/activity"), 5);
    // one visit per route change
    assert_eq!(count("POST", "/activity/visits"), 2);
    // dashboard closed on navigate, grades closed on logout
    assert_eq!(count("PUT", "/activity/visits/end"), 2);
}

#[tokio::test]
async fn failing_config_endpoint_keeps_the_bridge_detached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/activity/config"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let context = context_for(&server);
    let (tx, rx) = mpsc::channel(16);

    let result = context.bridge.attach(rx).await;
    assert!(result.is_err());
    assert!(!context.bridge.is_attached().await);

    // Tracking is default-denied while unresolved
    tx.send(UiEvent::RouteChanged { path: "/dashboard".into() }).await.unwrap();
    sleep(Duration::from_millis(50)).await;
    context.shutdown().await;

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() == "/activity/config"));
}

#[tokio::test]
async fn config_update_is_visible_to_subsequent_events() {
    let server = MockServer::start().await;
    mount_happy_portal(&server).await;

    Mock::given(method("PUT"))
        .and(path("/activity/config"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let context = context_for(&server);
    let (tx, rx) = mpsc::channel(16);
    context.bridge.attach(rx).await.unwrap();

    // Student opts out of click tracking mid-session
    let record = context.gate.cached().await.unwrap();
    let mut next = record.clone();
    next.button_clicks = false;
    context.gate.update_config(next).await.unwrap();

    tx.send(UiEvent::ButtonClicked { element_id: "enroll".into(), path: "/p".into() })
        .await
        .unwrap();
    drop(tx);

    sleep(Duration::from_millis(100)).await;
    context.shutdown().await;

    let requests = server.received_requests().await.unwrap();
    let activity_posts =
        requests.iter().filter(|r| r.method.as_str() == "POST" && r.url.path() == "/activity");
    assert_eq!(activity_posts.count(), 0);
}
