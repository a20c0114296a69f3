//! SSE streaming endpoint.
//!
//! GET /api/streams/{topic}
//!
//! Subscribes to a StreamHub topic and forwards published JSON values as SSE
//! events, with the payload's "type" field as the SSE event name.
//!
//! Topic authorization is structural rather than credentialed: room topics
//! are public by design, and a submitter topic embeds the caller's opaque
//! token, which is itself the unguessable access credential. Anything else
//! is refused.

use std::convert::Infallible;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::server::app::AppState;

/// SSE stream handler - subscribes to a StreamHub topic and streams events.
///
/// Emits a `connected` event first so clients know the subscription is live,
/// then one event per published value. A slow consumer that overflows its
/// channel sees a `lagged` event with the missed count instead of stale data.
pub async fn stream_handler(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>, StatusCode> {
    validate_topic(&topic)?;

    let rx = state.deps.stream_hub.subscribe(&topic).await;

    let connected = tokio_stream::once(Ok::<_, Infallible>(
        Event::default().event("connected").data("ok"),
    ));

    let events = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(value) => {
            let event_name = value
                .get("type")
                .and_then(|t| t.as_str())
                .unwrap_or("message");
            Event::default()
                .event(event_name)
                .json_data(&value)
                .ok()
                .map(Ok)
        }
        Err(BroadcastStreamRecvError::Lagged(missed)) => Event::default()
            .event("lagged")
            .json_data(&serde_json::json!({ "missed": missed }))
            .ok()
            .map(Ok),
    });

    Ok(Sse::new(connected.chain(events)).keep_alive(KeepAlive::default()))
}

/// Structural topic check.
///
/// `room:forum` and `submitter:{token}` pass as-is; `room:post:{id}` must
/// carry a well-formed UUID to keep the hub's topic map from filling up with
/// junk.
fn validate_topic(topic: &str) -> Result<(), StatusCode> {
    if topic == "room:forum" {
        return Ok(());
    }
    if let Some(post_id) = topic.strip_prefix("room:post:") {
        uuid::Uuid::parse_str(post_id).map_err(|_| StatusCode::BAD_REQUEST)?;
        return Ok(());
    }
    if let Some(token) = topic.strip_prefix("submitter:") {
        if !token.is_empty() {
            return Ok(());
        }
    }
    Err(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_topic_shapes_are_allowed() {
        assert!(validate_topic("room:forum").is_ok());
        assert!(validate_topic(&format!("room:post:{}", uuid::Uuid::nil())).is_ok());
        assert!(validate_topic("submitter:opaque-token-1").is_ok());
    }

    #[test]
    fn junk_topics_are_refused() {
        assert!(validate_topic("room:post:not-a-uuid").is_err());
        assert!(validate_topic("submitter:").is_err());
        assert!(validate_topic("rooms:everything").is_err());
        assert!(validate_topic("").is_err());
    }
}
