//! Post model and queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::common::{ForumError, PostId};

/// Maximum post body length in characters, enforced before moderation.
pub const POST_BODY_MAX_CHARS: usize = 2000;

/// A top-level forum post.
///
/// `comment_count` is a cache of the live comment count under this post,
/// maintained by comment insert/delete inside their own transactions.
/// `active` is the soft-delete flag; posts are never hard-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub author_token: String,
    pub author_alias: String,
    pub body: String,
    pub comment_count: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Insert a new post. Callers have already validated the body and hold an
    /// Accept verdict; this is pure persistence.
    pub async fn create(
        author_token: String,
        author_alias: String,
        body: String,
        pool: &SqlitePool,
    ) -> Result<Self, ForumError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, author_token, author_alias, body, comment_count, active, created_at)
            VALUES (?1, ?2, ?3, ?4, 0, 1, ?5)
            RETURNING *
            "#,
        )
        .bind(PostId::new())
        .bind(author_token)
        .bind(author_alias)
        .bind(body)
        .bind(Utc::now())
        .fetch_one(pool)
        .await?;
        Ok(post)
    }

    /// Find a post regardless of its active flag (author checks, audits).
    pub async fn find_by_id(id: PostId, pool: &SqlitePool) -> Result<Option<Self>, ForumError> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(post)
    }

    /// Find an active post. Soft-deleted posts are invisible to readers, and
    /// their comments go with them.
    pub async fn find_active(id: PostId, pool: &SqlitePool) -> Result<Option<Self>, ForumError> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = ?1 AND active = 1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(post)
    }

    /// One page of active posts, newest first. UUIDv7 ids break created_at
    /// ties in insert order.
    pub async fn list_page(
        limit: i64,
        offset: i64,
        pool: &SqlitePool,
    ) -> Result<Vec<Self>, ForumError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT * FROM posts
            WHERE active = 1
            ORDER BY created_at DESC, id DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
        Ok(posts)
    }

    /// Soft-delete: flip `active` off. Returns whether a live post was hit.
    pub async fn soft_delete(id: PostId, pool: &SqlitePool) -> Result<bool, ForumError> {
        let result = sqlx::query("UPDATE posts SET active = 0 WHERE id = ?1 AND active = 1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
