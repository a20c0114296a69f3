//! Comment model and queries.
//!
//! Comments form a forest under their post: `parent_comment_id` of NULL means
//! top-level, anything else must reference a comment under the same post.
//! Depth is unbounded by design - capping it is a presentation concern.
//!
//! Counter maintenance and subtree deletion run inside transactions with
//! atomic SQL increments, so concurrent submissions on the same post cannot
//! lose updates, and a comment can never end up pointing at a deleted parent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::common::{CommentId, ForumError, PostId};

/// Maximum comment body length in characters, enforced before moderation.
pub const COMMENT_BODY_MAX_CHARS: usize = 1000;

/// A comment at any depth of a post's reply tree.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_token: String,
    pub author_alias: String,
    pub body: String,
    pub parent_comment_id: Option<CommentId>,
    pub reply_count: i64,
    pub created_at: DateTime<Utc>,
}

/// What a cascading delete removed, so callers can reconcile cached counts.
#[derive(Debug, Clone, Serialize)]
pub struct CascadeResult {
    pub removed_ids: Vec<CommentId>,
    pub removed_count: i64,
}

impl Comment {
    /// Insert a comment and maintain both derived counters in one transaction.
    ///
    /// Fails with `NotFound` if the post is missing or inactive, or if the
    /// parent does not exist under this same post (cross-post parenting is a
    /// not-found, not a special case).
    pub async fn create(
        post_id: PostId,
        author_token: String,
        author_alias: String,
        body: String,
        parent_comment_id: Option<CommentId>,
        pool: &SqlitePool,
    ) -> Result<Self, ForumError> {
        let mut tx = pool.begin().await?;

        let post_active = sqlx::query_scalar::<_, bool>("SELECT active FROM posts WHERE id = ?1")
            .bind(post_id)
            .fetch_optional(&mut *tx)
            .await?;
        if post_active != Some(true) {
            return Err(ForumError::NotFound("post"));
        }

        if let Some(parent_id) = parent_comment_id {
            // The parent lookup runs inside this transaction, so a cascade
            // delete either already removed the parent (we fail here) or has
            // not started (our insert lands inside the subtree and is removed
            // with it). Orphans are impossible either way.
            let parent_post = sqlx::query_scalar::<_, PostId>(
                "SELECT post_id FROM comments WHERE id = ?1",
            )
            .bind(parent_id)
            .fetch_optional(&mut *tx)
            .await?;
            match parent_post {
                Some(owner) if owner == post_id => {}
                _ => return Err(ForumError::NotFound("parent comment")),
            }

            sqlx::query("UPDATE comments SET reply_count = reply_count + 1 WHERE id = ?1")
                .bind(parent_id)
                .execute(&mut *tx)
                .await?;
        }

        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments
                (id, post_id, author_token, author_alias, body, parent_comment_id, reply_count, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)
            RETURNING *
            "#,
        )
        .bind(CommentId::new())
        .bind(post_id)
        .bind(author_token)
        .bind(author_alias)
        .bind(body)
        .bind(parent_comment_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE posts SET comment_count = comment_count + 1 WHERE id = ?1")
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(comment)
    }

    /// All comments for a post, oldest first - the order the tree builder
    /// expects.
    pub async fn find_by_post(post_id: PostId, pool: &SqlitePool) -> Result<Vec<Self>, ForumError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE post_id = ?1 ORDER BY created_at ASC, id ASC",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await?;
        Ok(comments)
    }

    /// Delete a comment and its entire reply subtree in one transaction.
    ///
    /// Authorization is the author's token on the subtree root only; the
    /// cascade takes descendants regardless of who wrote them. The surviving
    /// parent loses one reply, the post loses the full removed count.
    pub async fn delete_subtree(
        post_id: PostId,
        comment_id: CommentId,
        requester_token: &str,
        pool: &SqlitePool,
    ) -> Result<CascadeResult, ForumError> {
        let mut tx = pool.begin().await?;

        let root = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE id = ?1 AND post_id = ?2",
        )
        .bind(comment_id)
        .bind(post_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ForumError::NotFound("comment"))?;

        if root.author_token != requester_token {
            return Err(ForumError::Unauthorized(
                "only the author may delete a comment".to_string(),
            ));
        }

        let removed_ids = sqlx::query_scalar::<_, CommentId>(
            r#"
            WITH RECURSIVE subtree(id) AS (
                SELECT id FROM comments WHERE id = ?1
                UNION ALL
                SELECT c.id FROM comments c JOIN subtree s ON c.parent_comment_id = s.id
            )
            SELECT id FROM subtree
            "#,
        )
        .bind(comment_id)
        .fetch_all(&mut *tx)
        .await?;

        let deleted = sqlx::query(
            r#"
            WITH RECURSIVE subtree(id) AS (
                SELECT id FROM comments WHERE id = ?1
                UNION ALL
                SELECT c.id FROM comments c JOIN subtree s ON c.parent_comment_id = s.id
            )
            DELETE FROM comments WHERE id IN (SELECT id FROM subtree)
            "#,
        )
        .bind(comment_id)
        .execute(&mut *tx)
        .await?;
        let removed_count = deleted.rows_affected() as i64;

        if let Some(parent_id) = root.parent_comment_id {
            // The parent is outside the subtree, so it survived the delete.
            sqlx::query("UPDATE comments SET reply_count = reply_count - 1 WHERE id = ?1")
                .bind(parent_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE posts SET comment_count = comment_count - ?1 WHERE id = ?2")
            .bind(removed_count)
            .bind(post_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(CascadeResult {
            removed_ids,
            removed_count,
        })
    }

    /// Live comment count for a post, straight from the rows. Used by tests
    /// to check the `comment_count` cache invariant.
    pub async fn count_for_post(post_id: PostId, pool: &SqlitePool) -> Result<i64, ForumError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE post_id = ?1")
                .bind(post_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}
