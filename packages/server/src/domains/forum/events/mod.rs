//! Forum live-feed events.
//!
//! Serialized to JSON and published to the StreamHub; the SSE endpoint reads
//! the "type" field to set the SSE event name.
//!
//! Room topics carry only accepted content (`new_post` / `new_comment`).
//! Accept/reject echoes go to the submitter's private topic alone - a
//! rejection must never be observable by anyone else, even transiently.

use serde::{Deserialize, Serialize};

use crate::common::PostId;
use crate::domains::forum::data::{CommentData, PostData};

/// One live-feed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ForumStreamEvent {
    /// An accepted post, broadcast to the forum room.
    NewPost { record: PostData },

    /// An accepted comment, broadcast to the forum room and the post's room.
    NewComment { record: CommentData },

    /// Private echo: the submitter's post was accepted and persisted.
    PostAccepted { record: PostData },

    /// Private echo: the submitter's post was rejected by moderation.
    PostRejected { reason: String },

    /// Private echo: the submitter's comment was accepted and persisted.
    CommentAccepted { record: CommentData },

    /// Private echo: the submitter's comment was rejected by moderation.
    CommentRejected {
        reason: String,
        post_id: String,
        parent_comment_id: Option<String>,
    },
}

impl ForumStreamEvent {
    /// The forum-wide room topic.
    pub fn forum_topic() -> &'static str {
        "room:forum"
    }

    /// The per-post room topic.
    pub fn post_topic(post_id: PostId) -> String {
        format!("room:post:{post_id}")
    }

    /// A submitter's private topic. The caller token is opaque and
    /// unguessable, which is what keeps this channel private.
    pub fn submitter_topic(caller_token: &str) -> String {
        format!("submitter:{caller_token}")
    }

    /// Serialize for publishing. Event types are plain data; serialization
    /// cannot fail in practice, but the hub takes a Value, not a type.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"type": "error"}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_tag_with_protocol_names() {
        let event = ForumStreamEvent::PostRejected {
            reason: "spam".to_string(),
        };
        let json = event.to_value();
        assert_eq!(json["type"], "post_rejected");
        assert_eq!(json["reason"], "spam");

        let event = ForumStreamEvent::CommentRejected {
            reason: "abusive".to_string(),
            post_id: "p1".to_string(),
            parent_comment_id: None,
        };
        assert_eq!(event.to_value()["type"], "comment_rejected");
    }

    #[test]
    fn topics_have_stable_names() {
        assert_eq!(ForumStreamEvent::forum_topic(), "room:forum");
        let id = PostId::nil();
        assert_eq!(
            ForumStreamEvent::post_topic(id),
            format!("room:post:{id}")
        );
        assert_eq!(
            ForumStreamEvent::submitter_topic("tok-1"),
            "submitter:tok-1"
        );
    }
}
