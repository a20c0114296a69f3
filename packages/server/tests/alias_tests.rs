//! Alias assignment: idempotence, uniqueness, concurrent first resolution.

mod common;

use std::collections::HashSet;

use common::harness::test_pool;
use common::TestApp;
use forum_core::domains::identity::AliasRecord;
use serde_json::Value;

#[tokio::test]
async fn resolution_is_idempotent_over_http() {
    let app = TestApp::spawn().await.unwrap();

    let first: Value = app
        .client
        .get(app.url("/api/aliases/opaque-tok-1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second: Value = app
        .client
        .get(app.url("/api/aliases/opaque-tok-1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let alias = first["alias"].as_str().unwrap();
    assert!(!alias.is_empty());
    assert_eq!(first["alias"], second["alias"]);
}

#[tokio::test]
async fn distinct_tokens_get_distinct_aliases() {
    let pool = test_pool().await.unwrap();

    let mut seen = HashSet::new();
    for n in 0..50 {
        let alias = AliasRecord::resolve(&format!("tok-{n}"), &pool).await.unwrap();
        assert!(seen.insert(alias), "alias collision across tokens");
    }
}

#[tokio::test]
async fn concurrent_first_resolution_converges_on_one_alias() {
    let pool = test_pool().await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            AliasRecord::resolve("racing-token", &pool).await
        }));
    }

    let mut aliases = Vec::new();
    for handle in handles {
        aliases.push(handle.await.unwrap().unwrap());
    }

    let first = &aliases[0];
    assert!(aliases.iter().all(|a| a == first));

    // Exactly one row exists for the token.
    let stored = AliasRecord::find_by_token("racing-token", &pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(&stored.alias, first);
}

#[tokio::test]
async fn submissions_snapshot_the_submitters_alias() {
    let app = TestApp::spawn().await.unwrap();

    let alias: Value = app
        .client
        .get(app.url("/api/aliases/tok-9"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let echo: Value = app
        .client
        .post(app.url("/api/posts"))
        .json(&serde_json::json!({"caller_token": "tok-9", "body": "checking in"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(echo["record"]["author_alias"], alias["alias"]);
}
