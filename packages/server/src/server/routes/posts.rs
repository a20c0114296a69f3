//! Post and comment endpoints: read paths, submissions, deletions.
//!
//! Submission responses ARE the private acknowledgment events - the same
//! JSON shape that lands on the submitter's stream topic.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{CommentId, ForumError, PostId};
use crate::domains::forum::actions;
use crate::domains::forum::data::{build_comment_tree, CommentNode, PostData};
use crate::domains::forum::events::ForumStreamEvent;
use crate::domains::forum::models::{Comment, Post};
use crate::server::app::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// Read paths
// =============================================================================

#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

/// GET /api/posts?page&page_size - active posts, newest first.
pub async fn list_posts_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Vec<PostData>>, ForumError> {
    let page = query.page.unwrap_or(0).max(0);
    let page_size = query
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let posts = Post::list_page(page_size, page * page_size, &state.deps.db_pool).await?;
    Ok(Json(posts.into_iter().map(PostData::from).collect()))
}

/// A post with its fully assembled reply tree.
#[derive(Serialize)]
pub struct PostDetail {
    pub post: PostData,
    pub comments: Vec<CommentNode>,
}

/// GET /api/posts/{post_id} - post plus full comment tree.
///
/// Soft-deleted posts 404 here, comments included: hiding the thread hides
/// its replies.
pub async fn get_post_handler(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostDetail>, ForumError> {
    let post_id = PostId::from_uuid(post_id);

    let post = Post::find_active(post_id, &state.deps.db_pool)
        .await?
        .ok_or(ForumError::NotFound("post"))?;

    let comments = Comment::find_by_post(post_id, &state.deps.db_pool).await?;

    Ok(Json(PostDetail {
        post: PostData::from(post),
        comments: build_comment_tree(comments),
    }))
}

// =============================================================================
// Submissions
// =============================================================================

#[derive(Deserialize)]
pub struct SubmitPostRequest {
    pub caller_token: String,
    pub body: String,
}

/// POST /api/posts - submit a post through moderation.
///
/// 201 with `post_accepted{record}` on accept, 200 with
/// `post_rejected{reason}` on reject.
///
/// The flow runs in a detached task: a submitter who disconnects mid-
/// moderation does not cancel the verdict, and an accepted record is still
/// persisted and broadcast - only the private echo goes nowhere.
pub async fn submit_post_handler(
    State(state): State<AppState>,
    Json(request): Json<SubmitPostRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ForumError> {
    let deps = state.deps.clone();
    let echo = tokio::spawn(async move {
        actions::submit_post(&request.caller_token, request.body, &deps).await
    })
    .await
    .map_err(|e| ForumError::Internal(format!("submission task failed: {e}")))??;

    let status = match &echo {
        ForumStreamEvent::PostAccepted { .. } => StatusCode::CREATED,
        _ => StatusCode::OK,
    };
    // Serialized the same way the stream publishes it, so the response body
    // and the broadcast record match byte for byte.
    Ok((status, Json(echo.to_value())))
}

#[derive(Deserialize)]
pub struct SubmitCommentRequest {
    pub caller_token: String,
    pub body: String,
    #[serde(default)]
    pub parent_comment_id: Option<CommentId>,
}

/// POST /api/posts/{post_id}/comments - submit a comment through moderation.
///
/// Detached from the connection for the same reason as `submit_post_handler`.
pub async fn submit_comment_handler(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Json(request): Json<SubmitCommentRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ForumError> {
    let deps = state.deps.clone();
    let echo = tokio::spawn(async move {
        actions::submit_comment(
            &request.caller_token,
            PostId::from_uuid(post_id),
            request.body,
            request.parent_comment_id,
            &deps,
        )
        .await
    })
    .await
    .map_err(|e| ForumError::Internal(format!("submission task failed: {e}")))??;

    let status = match &echo {
        ForumStreamEvent::CommentAccepted { .. } => StatusCode::CREATED,
        _ => StatusCode::OK,
    };
    Ok((status, Json(echo.to_value())))
}

// =============================================================================
// Deletions
// =============================================================================

#[derive(Deserialize)]
pub struct DeleteRequest {
    pub caller_token: String,
}

#[derive(Serialize)]
pub struct DeletePostResponse {
    pub deleted: bool,
}

/// DELETE /api/posts/{post_id} - author-only soft delete.
pub async fn delete_post_handler(
    State(state): State<AppState>,
    Path(post_id): Path<Uuid>,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<DeletePostResponse>, ForumError> {
    actions::delete_post(PostId::from_uuid(post_id), &request.caller_token, &state.deps).await?;
    Ok(Json(DeletePostResponse { deleted: true }))
}

#[derive(Serialize)]
pub struct DeleteCommentResponse {
    pub removed_ids: Vec<String>,
    pub removed_count: i64,
}

/// DELETE /api/posts/{post_id}/comments/{comment_id} - author-only cascading
/// delete; the response lists everything that went with it.
pub async fn delete_comment_handler(
    State(state): State<AppState>,
    Path((post_id, comment_id)): Path<(Uuid, Uuid)>,
    Json(request): Json<DeleteRequest>,
) -> Result<Json<DeleteCommentResponse>, ForumError> {
    let result = actions::delete_comment(
        PostId::from_uuid(post_id),
        CommentId::from_uuid(comment_id),
        &request.caller_token,
        &state.deps,
    )
    .await?;

    Ok(Json(DeleteCommentResponse {
        removed_ids: result.removed_ids.iter().map(|id| id.to_string()).collect(),
        removed_count: result.removed_count,
    }))
}
