//! SSE endpoint behavior over a real connection.

mod common;

use std::time::Duration;

use common::TestApp;
use serde_json::json;

/// Read chunks from an open SSE response until `needle` shows up or the
/// deadline passes.
async fn read_until(response: &mut reqwest::Response, needle: &str) -> String {
    let mut seen = String::new();
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        match tokio::time::timeout(remaining, response.chunk()).await {
            Ok(Ok(Some(bytes))) => {
                seen.push_str(&String::from_utf8_lossy(&bytes));
                if seen.contains(needle) {
                    return seen;
                }
            }
            _ => panic!("SSE stream ended before {needle:?} arrived; saw: {seen}"),
        }
    }
}

#[tokio::test]
async fn stream_connects_and_receives_room_broadcasts() {
    let app = TestApp::spawn().await.unwrap();

    let mut response = app
        .client
        .get(app.url("/api/streams/room:forum"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // Handshake first, so the publish below cannot race the subscription.
    read_until(&mut response, "event: connected").await;

    app.client
        .post(app.url("/api/posts"))
        .json(&json!({"caller_token": "tok-sse", "body": "streamed live"}))
        .send()
        .await
        .unwrap();

    let seen = read_until(&mut response, "event: new_post").await;
    assert!(seen.contains("streamed live"));
}

#[tokio::test]
async fn submitter_stream_carries_private_rejections() {
    let app = TestApp::spawn().await.unwrap();
    app.judge.push_reject("spam");

    let mut response = app
        .client
        .get(app.url("/api/streams/submitter:tok-priv"))
        .send()
        .await
        .unwrap();
    read_until(&mut response, "event: connected").await;

    app.client
        .post(app.url("/api/posts"))
        .json(&json!({"caller_token": "tok-priv", "body": "hello"}))
        .send()
        .await
        .unwrap();

    let seen = read_until(&mut response, "event: post_rejected").await;
    assert!(seen.contains("spam"));
}

#[tokio::test]
async fn malformed_topics_are_refused() {
    let app = TestApp::spawn().await.unwrap();

    let response = app
        .client
        .get(app.url("/api/streams/room:post:not-a-uuid"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);

    let response = app
        .client
        .get(app.url("/api/streams/somewhere:else"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}
