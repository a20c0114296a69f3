//! API representation of a post.

use serde::{Deserialize, Serialize};

use crate::domains::forum::models::Post;

/// What readers and live-feed subscribers see of a post.
///
/// Deliberately excludes `author_token` (the forum is pseudonymous - only the
/// alias is public) and `active` (inactive posts are simply not served).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostData {
    pub id: String,
    pub author_alias: String,
    pub body: String,
    pub comment_count: i64,
    pub created_at: String,
}

impl From<Post> for PostData {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            author_alias: post.author_alias,
            body: post.body,
            comment_count: post.comment_count,
            created_at: post.created_at.to_rfc3339(),
        }
    }
}
