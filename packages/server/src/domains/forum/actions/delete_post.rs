//! Delete post action - author-only soft delete.

use tracing::info;

use crate::common::{ForumError, PostId};
use crate::domains::forum::models::Post;
use crate::kernel::ServerDeps;

/// Soft-delete a post. Authorization is strict token equality against the
/// stored author token. Comments are hidden with the post (they stay in
/// storage for audit, but the read path stops serving them).
pub async fn delete_post(
    post_id: PostId,
    caller_token: &str,
    deps: &ServerDeps,
) -> Result<(), ForumError> {
    let post = Post::find_active(post_id, &deps.db_pool)
        .await?
        .ok_or(ForumError::NotFound("post"))?;

    if post.author_token != caller_token {
        return Err(ForumError::Unauthorized(
            "only the author may delete a post".to_string(),
        ));
    }

    Post::soft_delete(post_id, &deps.db_pool).await?;
    info!(post_id = %post_id, "post soft-deleted by author");
    Ok(())
}
