//! Delete comment action - author-only cascading delete.

use tracing::info;

use crate::common::{CommentId, ForumError, PostId};
use crate::domains::forum::models::{CascadeResult, Comment};
use crate::kernel::ServerDeps;

/// Delete a comment and its entire reply subtree.
///
/// Authorization and the cascade itself are enforced by the store in a single
/// transaction; the returned result carries every removed id so callers can
/// reconcile cached counts.
pub async fn delete_comment(
    post_id: PostId,
    comment_id: CommentId,
    caller_token: &str,
    deps: &ServerDeps,
) -> Result<CascadeResult, ForumError> {
    let result = Comment::delete_subtree(post_id, comment_id, caller_token, &deps.db_pool).await?;
    info!(
        comment_id = %comment_id,
        post_id = %post_id,
        removed = result.removed_count,
        "comment subtree deleted by author"
    );
    Ok(result)
}
