//! API representation of comments, including the read-time reply tree.
//!
//! The tree is never stored - rows carry only `parent_comment_id`, and the
//! detail read path assembles nesting here. One pass groups rows into an
//! adjacency map, then children attach recursively, so build cost is linear
//! in the number of comments rather than a filter scan per node.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::common::CommentId;
use crate::domains::forum::models::Comment;

/// What readers and live-feed subscribers see of a single comment.
///
/// Like `PostData`, the author's token never leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentData {
    pub id: String,
    pub post_id: String,
    pub author_alias: String,
    pub body: String,
    pub parent_comment_id: Option<String>,
    pub reply_count: i64,
    pub created_at: String,
}

impl From<Comment> for CommentData {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            author_alias: comment.author_alias,
            body: comment.body,
            parent_comment_id: comment.parent_comment_id.map(|id| id.to_string()),
            reply_count: comment.reply_count,
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}

/// A comment with its direct replies attached, to unlimited depth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: CommentData,
    pub replies: Vec<CommentNode>,
}

/// Assemble the reply forest from flat rows.
///
/// Rows must arrive in creation order (the model's `find_by_post` order);
/// siblings keep that order at every level. Rows whose parent is absent from
/// the input are dropped - with cascade deletion that situation cannot occur,
/// so there is nothing sensible to attach them to.
pub fn build_comment_tree(comments: Vec<Comment>) -> Vec<CommentNode> {
    let mut children: HashMap<Option<CommentId>, Vec<Comment>> = HashMap::new();
    for comment in comments {
        children
            .entry(comment.parent_comment_id)
            .or_default()
            .push(comment);
    }
    attach(None, &mut children)
}

fn attach(
    parent: Option<CommentId>,
    children: &mut HashMap<Option<CommentId>, Vec<Comment>>,
) -> Vec<CommentNode> {
    let rows = children.remove(&parent).unwrap_or_default();
    let mut nodes = Vec::with_capacity(rows.len());
    for comment in rows {
        let id = comment.id;
        let replies = attach(Some(id), children);
        nodes.push(CommentNode {
            comment: CommentData::from(comment),
            replies,
        });
    }
    nodes
}
