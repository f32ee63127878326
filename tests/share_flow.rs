//! End-to-end tests of the share flow over real HTTP
//!
//! Each test runs the router on an ephemeral port against a stub platform.

mod common;

use std::time::Duration;

use url::Url;

use common::{
    data_event, error_event, PullBehavior, StubPlatform, TestServer, APP_ID, CONTRACT_ID,
    PRIVATE_KEY, SESSION_KEY,
};
use private_share::auth::PrivateKey;
use private_share::web::WebSettings;

fn no_files() -> StubPlatform {
    StubPlatform::new(PullBehavior::Events(Vec::new()))
}

#[tokio::test]
async fn test_cancelled_share_renders_error_page_without_pull() {
    let server = TestServer::start(no_files()).await;

    let (status, body) = server.get("/return?result=CANCELLED&sessionId=abc123").await;

    assert_eq!(status, 200);
    assert!(body.contains("Something went wrong"));
    assert_eq!(server.platform.pull_count(), 0);
}

#[tokio::test]
async fn test_only_exact_success_triggers_pull() {
    let server = TestServer::start(no_files()).await;

    for query in [
        "/return?sessionId=abc123",
        "/return?result=FAILURE&sessionId=abc123",
        "/return?result=success&sessionId=abc123",
        "/return?result=&sessionId=abc123",
    ] {
        let (status, body) = server.get(query).await;
        assert_eq!(status, 200, "{}", query);
        assert!(body.contains("Something went wrong"), "{}", query);
    }

    assert_eq!(server.platform.pull_count(), 0);
}

#[tokio::test]
async fn test_repeated_query_keys_render_error_page() {
    let server = TestServer::start(no_files()).await;

    for query in [
        "/return?result=SUCCESS&result=CANCELLED&sessionId=abc123",
        "/return?result=CANCELLED&sessionId=a&sessionId=b",
        "/return?result=SUCCESS&sessionId=a&sessionId=b",
    ] {
        let (status, body) = server.get(query).await;
        assert_eq!(status, 200, "{}", query);
        assert!(body.contains("Something went wrong"), "{}", query);
    }

    assert_eq!(server.platform.pull_count(), 0);
}

#[tokio::test]
async fn test_success_pulls_with_session_id_and_private_key() {
    let server = TestServer::start(no_files()).await;

    let (status, body) = server.get("/return?result=SUCCESS&sessionId=abc123").await;

    assert_eq!(status, 200);
    assert!(body.contains("Thank you for sharing your data"));
    assert!(body.contains("0 file(s) received."));

    let pulls = server.platform.pulls.lock().unwrap();
    assert_eq!(pulls.len(), 1);
    assert_eq!(pulls[0].session_key, "abc123");
    assert_eq!(pulls[0].private_key, PrivateKey::new(PRIVATE_KEY));
}

#[tokio::test]
async fn test_thank_you_page_counts_received_and_failed_files() {
    let platform = StubPlatform::new(PullBehavior::Events(vec![
        data_event("F1.json", r#"{"fileData":[1,2,3]}"#),
        error_event("F3.json", "decryption failed"),
        data_event("F2.json", r#"{"fileData":[]}"#),
    ]));
    let server = TestServer::start(platform).await;

    let (status, body) = server.get("/return?result=SUCCESS&sessionId=abc123").await;

    assert_eq!(status, 200);
    assert!(body.contains("Thank you for sharing your data"));
    assert!(body.contains("2 file(s) received, 1 could not be read."));
}

#[tokio::test]
async fn test_unparseable_file_counts_as_failed() {
    let platform = StubPlatform::new(PullBehavior::Events(vec![
        data_event("good.json", r#"{"ok":true}"#),
        data_event("bad.json", "not json"),
    ]));
    let server = TestServer::start(platform).await;

    let (status, body) = server.get("/return?result=SUCCESS&sessionId=abc123").await;

    assert_eq!(status, 200);
    assert!(body.contains("1 file(s) received, 1 could not be read."));
}

#[tokio::test]
async fn test_missing_session_id_is_bad_request() {
    let server = TestServer::start(no_files()).await;

    let (status, body) = server.get("/return?result=SUCCESS").await;
    assert_eq!(status, 400);
    assert!(body.contains("The session id is missing."));

    let (status, _) = server.get("/return?result=SUCCESS&sessionId=").await;
    assert_eq!(status, 400);

    assert_eq!(server.platform.pull_count(), 0);
}

#[tokio::test]
async fn test_failed_pull_is_bad_gateway() {
    let server = TestServer::start(StubPlatform::new(PullBehavior::Fail)).await;

    let (status, body) = server.get("/return?result=SUCCESS&sessionId=abc123").await;

    assert_eq!(status, 502);
    assert!(body.contains("could not be retrieved"));
    assert_eq!(server.platform.pull_count(), 1);
}

#[tokio::test]
async fn test_pull_that_never_completes_times_out() {
    let settings = WebSettings {
        pull_timeout: Duration::from_millis(200),
        ..WebSettings::default()
    };
    let server = TestServer::start_with(StubPlatform::new(PullBehavior::Hang), settings).await;

    let (status, body) = server.get("/return?result=SUCCESS&sessionId=abc123").await;

    assert_eq!(status, 504);
    assert!(body.contains("took too long"));
}

#[tokio::test]
async fn test_start_page_links_share_one_session() {
    let server = TestServer::start(no_files()).await;

    let (status, body) = server.get("/").await;

    assert_eq!(status, 200);
    assert!(body.contains("id=\"web-share\""));
    assert!(body.contains("id=\"app-share\""));
    assert!(body.contains(SESSION_KEY));

    assert_eq!(server.state.sessions().outstanding().await, 0);

    let requests = server.platform.session_requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![(APP_ID.to_string(), CONTRACT_ID.to_string())]
    );

    let expected = Url::parse(&format!(
        "http://{}/return?sessionId={}",
        server.addr, SESSION_KEY
    ))
    .unwrap();
    let callbacks = server.platform.callbacks.lock().unwrap().clone();
    assert_eq!(callbacks, vec![expected.clone(), expected]);
}

#[tokio::test]
async fn test_forwarded_proto_is_used_for_callback() {
    let server = TestServer::start(no_files()).await;

    let response = server
        .http
        .get(server.url("/"))
        .header("X-Forwarded-Proto", "https")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let callbacks = server.platform.callbacks.lock().unwrap().clone();
    assert_eq!(callbacks.len(), 2);
    assert_eq!(callbacks[0].scheme(), "https");
}

#[tokio::test]
async fn test_public_base_url_overrides_host() {
    let settings = WebSettings {
        public_base_url: Some(Url::parse("https://share.example.org/app/").unwrap()),
        ..WebSettings::default()
    };
    let server = TestServer::start_with(no_files(), settings).await;

    let (status, _) = server.get("/").await;
    assert_eq!(status, 200);

    let callbacks = server.platform.callbacks.lock().unwrap().clone();
    assert_eq!(
        callbacks[0].as_str(),
        "https://share.example.org/app/return?sessionId=sess-1"
    );
}

#[tokio::test]
async fn test_session_failure_is_bad_gateway() {
    let server = TestServer::start(StubPlatform::failing_session()).await;

    let (status, body) = server.get("/").await;

    assert_eq!(status, 502);
    assert!(body.contains("could not start a session"));
    assert!(server.platform.callbacks.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_verified_sessions_are_one_shot() {
    let settings = WebSettings {
        verify_session: true,
        ..WebSettings::default()
    };
    let server = TestServer::start_with(no_files(), settings).await;

    let (status, _) = server.get("/return?result=SUCCESS&sessionId=forged").await;
    assert_eq!(status, 403);
    assert_eq!(server.platform.pull_count(), 0);

    let (status, _) = server.get("/").await;
    assert_eq!(status, 200);
    assert_eq!(server.state.sessions().outstanding().await, 1);

    let query = format!("/return?result=SUCCESS&sessionId={}", SESSION_KEY);
    let (status, _) = server.get(&query).await;
    assert_eq!(status, 200);
    assert_eq!(server.platform.pull_count(), 1);

    let (status, _) = server.get(&query).await;
    assert_eq!(status, 403);
    assert_eq!(server.platform.pull_count(), 1);
}
