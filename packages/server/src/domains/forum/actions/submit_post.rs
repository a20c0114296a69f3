//! Submit post action - moderate, persist, broadcast.

use judge_client::ContentKind;
use tracing::info;

use crate::common::ForumError;
use crate::domains::forum::actions::validate_body;
use crate::domains::forum::data::PostData;
use crate::domains::forum::events::ForumStreamEvent;
use crate::domains::forum::models::{Post, POST_BODY_MAX_CHARS};
use crate::domains::identity::AliasRecord;
use crate::kernel::ServerDeps;

/// Submit a post to the forum.
///
/// Returns the private echo event for the submitter: `post_accepted` with the
/// canonical record, or `post_rejected` with the judge's reason. The same
/// event is also published to the submitter's private topic, and on accept
/// the record is broadcast to the forum room.
///
/// The only hard failure after an Accept verdict is persistence - content
/// judged safe that could not be durably recorded surfaces as an error and is
/// never broadcast.
pub async fn submit_post(
    caller_token: &str,
    body: String,
    deps: &ServerDeps,
) -> Result<ForumStreamEvent, ForumError> {
    validate_body(&body, POST_BODY_MAX_CHARS, "post")?;

    let alias = AliasRecord::resolve(caller_token, &deps.db_pool).await?;

    let outcome = deps.moderation.moderate(&body, ContentKind::Post).await;
    if !outcome.is_accept() {
        info!(alias = %alias, reason = %outcome.reason, "post rejected by moderation");
        let echo = ForumStreamEvent::PostRejected {
            reason: outcome.reason,
        };
        deps.stream_hub
            .publish(&ForumStreamEvent::submitter_topic(caller_token), echo.to_value())
            .await;
        return Ok(echo);
    }

    let post = Post::create(caller_token.to_string(), alias, body, &deps.db_pool).await?;
    info!(post_id = %post.id, "post accepted and persisted");

    let record = PostData::from(post);

    deps.stream_hub
        .publish(
            ForumStreamEvent::forum_topic(),
            ForumStreamEvent::NewPost {
                record: record.clone(),
            }
            .to_value(),
        )
        .await;

    let echo = ForumStreamEvent::PostAccepted { record };
    deps.stream_hub
        .publish(&ForumStreamEvent::submitter_topic(caller_token), echo.to_value())
        .await;

    Ok(echo)
}
