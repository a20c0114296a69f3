//! Test fixtures for creating forum data.
//!
//! These use the model methods directly - they exist for tests that need
//! stored rows without going through moderation.

use forum_core::common::{CommentId, PostId};
use forum_core::domains::forum::models::{Comment, Post};
use sqlx::SqlitePool;

/// Insert a post directly into the store.
pub async fn seed_post(pool: &SqlitePool, author_token: &str, body: &str) -> PostId {
    Post::create(
        author_token.to_string(),
        "SeededWillow10".to_string(),
        body.to_string(),
        pool,
    )
    .await
    .expect("seed post")
    .id
}

/// Insert a comment directly into the store.
pub async fn seed_comment(
    pool: &SqlitePool,
    post_id: PostId,
    author_token: &str,
    body: &str,
    parent: Option<CommentId>,
) -> CommentId {
    Comment::create(
        post_id,
        author_token.to_string(),
        "SeededRobin11".to_string(),
        body.to_string(),
        parent,
        pool,
    )
    .await
    .expect("seed comment")
    .id
}
