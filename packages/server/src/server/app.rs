//! Application setup and server configuration.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    delete_comment_handler, delete_post_handler, get_post_handler, health_handler,
    list_posts_handler, resolve_alias_handler, stream_handler, submit_comment_handler,
    submit_post_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
}

/// Build the axum application router.
///
/// Tests call this with scripted dependencies and an in-memory pool; the
/// binary wires the real judge client and a file-backed database.
pub fn build_app(deps: ServerDeps) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/posts", get(list_posts_handler).post(submit_post_handler))
        .route(
            "/api/posts/{post_id}",
            get(get_post_handler).delete(delete_post_handler),
        )
        .route("/api/posts/{post_id}/comments", post(submit_comment_handler))
        .route(
            "/api/posts/{post_id}/comments/{comment_id}",
            delete(delete_comment_handler),
        )
        .route("/api/aliases/{caller_token}", get(resolve_alias_handler))
        .route("/api/streams/{topic}", get(stream_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { deps })
}
