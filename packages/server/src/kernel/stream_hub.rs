//! In-process pub/sub hub for the live forum feed.
//!
//! Topic-keyed broadcast channels connecting submission actions to SSE
//! endpoints. Topics are opaque strings - the hub does not know rooms from
//! private submitter channels; the forum domain owns the naming scheme.
//!
//! Ordering: a `tokio::sync::broadcast` channel delivers values to every
//! receiver in send order, so for any one topic subscribers observe events in
//! exactly the order they were published. The hub adds no queuing of its own.
//!
//! # Usage
//!
//! Producers (forum actions):
//!   hub.publish("room:forum", json!({"type": "new_post", ...})).await;
//!
//! Consumers (SSE endpoints):
//!   let rx = hub.subscribe("room:forum").await;

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Per-topic channel capacity. A subscriber that falls this many events
/// behind starts seeing `Lagged` instead of stale data.
const DEFAULT_CAPACITY: usize = 256;

/// Topic-keyed broadcast hub. Thread-safe, cheap to clone.
///
/// Payloads are `serde_json::Value` - the forum domain serializes its own
/// event types before publishing.
#[derive(Clone)]
pub struct StreamHub {
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<serde_json::Value>>>>,
    capacity: usize,
}

impl StreamHub {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity,
        }
    }

    /// Publish a JSON value to a topic.
    ///
    /// A topic nobody subscribed to is a no-op - this is what makes dropping
    /// the private echo to a disconnected submitter safe.
    pub async fn publish(&self, topic: &str, value: serde_json::Value) {
        let channels = self.channels.read().await;
        if let Some(tx) = channels.get(topic) {
            // Send errors mean no active receivers; nothing to do.
            let _ = tx.send(value);
        }
    }

    /// Subscribe to a topic, creating the channel if it doesn't exist yet.
    pub async fn subscribe(&self, topic: &str) -> broadcast::Receiver<serde_json::Value> {
        let mut channels = self.channels.write().await;
        let tx = channels
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        tx.subscribe()
    }

    /// Number of live subscribers on a topic.
    pub async fn subscriber_count(&self, topic: &str) -> usize {
        let channels = self.channels.read().await;
        channels
            .get(topic)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }

    /// Drop channels whose last subscriber has disconnected (housekeeping).
    pub async fn cleanup(&self) {
        let mut channels = self.channels.write().await;
        channels.retain(|_, tx| tx.receiver_count() > 0);
    }
}

impl Default for StreamHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_to_a_subscriber() {
        let hub = StreamHub::new();
        let mut rx = hub.subscribe("room:forum").await;

        let event = serde_json::json!({"type": "new_post", "record": {"body": "hi"}});
        hub.publish("room:forum", event.clone()).await;

        assert_eq!(rx.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_noop() {
        let hub = StreamHub::new();
        hub.publish("submitter:gone", serde_json::json!({"type": "post_accepted"}))
            .await;
    }

    #[tokio::test]
    async fn every_room_subscriber_sees_every_event() {
        let hub = StreamHub::new();
        let mut rx1 = hub.subscribe("room:forum").await;
        let mut rx2 = hub.subscribe("room:forum").await;

        let event = serde_json::json!({"type": "new_comment"});
        hub.publish("room:forum", event.clone()).await;

        assert_eq!(rx1.recv().await.unwrap(), event);
        assert_eq!(rx2.recv().await.unwrap(), event);
    }

    #[tokio::test]
    async fn topics_are_isolated() {
        let hub = StreamHub::new();
        let mut room = hub.subscribe("room:forum").await;
        let mut private = hub.subscribe("submitter:tok-1").await;

        hub.publish("submitter:tok-1", serde_json::json!({"type": "post_rejected"}))
            .await;

        assert_eq!(
            private.recv().await.unwrap(),
            serde_json::json!({"type": "post_rejected"})
        );
        assert!(matches!(
            room.try_recv(),
            Err(broadcast::error::TryRecvError::Empty)
        ));
    }

    #[tokio::test]
    async fn publish_order_is_preserved_per_topic() {
        let hub = StreamHub::new();
        let mut rx = hub.subscribe("room:post:abc").await;

        for n in 0..10 {
            hub.publish("room:post:abc", serde_json::json!({"seq": n}))
                .await;
        }

        for n in 0..10 {
            assert_eq!(rx.recv().await.unwrap(), serde_json::json!({"seq": n}));
        }
    }

    #[tokio::test]
    async fn cleanup_drops_abandoned_channels() {
        let hub = StreamHub::new();
        let rx = hub.subscribe("submitter:ephemeral").await;
        assert_eq!(hub.subscriber_count("submitter:ephemeral").await, 1);

        drop(rx);
        hub.cleanup().await;

        assert_eq!(hub.subscriber_count("submitter:ephemeral").await, 0);
        assert!(hub.channels.read().await.is_empty());
    }
}
