//! Submit comment action - moderate, persist into the reply tree, broadcast.

use judge_client::ContentKind;
use tracing::info;

use crate::common::{CommentId, ForumError, PostId};
use crate::domains::forum::actions::validate_body;
use crate::domains::forum::data::CommentData;
use crate::domains::forum::events::ForumStreamEvent;
use crate::domains::forum::models::{Comment, COMMENT_BODY_MAX_CHARS};
use crate::domains::identity::AliasRecord;
use crate::kernel::ServerDeps;

/// Submit a comment under a post, optionally as a reply to another comment.
///
/// Mirrors `submit_post`: the return value is the submitter's private echo,
/// and accepted comments broadcast to both the forum room and the post's own
/// room. Post/parent existence is enforced by the store inside the insert
/// transaction, so a rejected parent can never leave a partial write.
pub async fn submit_comment(
    caller_token: &str,
    post_id: PostId,
    body: String,
    parent_comment_id: Option<CommentId>,
    deps: &ServerDeps,
) -> Result<ForumStreamEvent, ForumError> {
    validate_body(&body, COMMENT_BODY_MAX_CHARS, "comment")?;

    let alias = AliasRecord::resolve(caller_token, &deps.db_pool).await?;

    let outcome = deps.moderation.moderate(&body, ContentKind::Comment).await;
    if !outcome.is_accept() {
        info!(alias = %alias, post_id = %post_id, reason = %outcome.reason, "comment rejected by moderation");
        let echo = ForumStreamEvent::CommentRejected {
            reason: outcome.reason,
            post_id: post_id.to_string(),
            parent_comment_id: parent_comment_id.map(|id| id.to_string()),
        };
        deps.stream_hub
            .publish(&ForumStreamEvent::submitter_topic(caller_token), echo.to_value())
            .await;
        return Ok(echo);
    }

    let comment = Comment::create(
        post_id,
        caller_token.to_string(),
        alias,
        body,
        parent_comment_id,
        &deps.db_pool,
    )
    .await?;
    info!(comment_id = %comment.id, post_id = %post_id, "comment accepted and persisted");

    let record = CommentData::from(comment);

    let broadcast = ForumStreamEvent::NewComment {
        record: record.clone(),
    }
    .to_value();
    deps.stream_hub
        .publish(ForumStreamEvent::forum_topic(), broadcast.clone())
        .await;
    deps.stream_hub
        .publish(&ForumStreamEvent::post_topic(post_id), broadcast)
        .await;

    let echo = ForumStreamEvent::CommentAccepted { record };
    deps.stream_hub
        .publish(&ForumStreamEvent::submitter_topic(caller_token), echo.to_value())
        .await;

    Ok(echo)
}
