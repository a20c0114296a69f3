//! Alias resolution endpoint.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::common::ForumError;
use crate::domains::identity::AliasRecord;
use crate::server::app::AppState;

#[derive(Serialize)]
pub struct AliasResponse {
    pub alias: String,
}

/// GET /api/aliases/{caller_token} - resolve or lazily create the caller's
/// pseudonym. Idempotent; never fails for alias-collision reasons.
pub async fn resolve_alias_handler(
    State(state): State<AppState>,
    Path(caller_token): Path<String>,
) -> Result<Json<AliasResponse>, ForumError> {
    let alias = AliasRecord::resolve(&caller_token, &state.deps.db_pool).await?;
    Ok(Json(AliasResponse { alias }))
}
