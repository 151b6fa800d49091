//! Cache invalidation events
//!
//! Mutating actions revalidate rendered paths. The [`EventBus`] broadcasts
//! each revalidation over `tokio::sync::broadcast` so that other parts of the
//! process can react without the actions knowing about them. The server
//! always runs one subscriber, [`EventBus::spawn_logger`].
//!
//! ```text
//! create / update / delete ──▶ CacheInvalidator::revalidate_path()
//!                                   ├──▶ PageCache evicts the path
//!                                   └──▶ EventBus::publish() ──▶ event logger task
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Events emitted by the dashboard's cache layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CacheEvent {
    /// A rendered path must be recomputed on next access
    PathRevalidated { path: String },
}

impl CacheEvent {
    pub fn path(&self) -> &str {
        match self {
            CacheEvent::PathRevalidated { path } => path,
        }
    }
}

/// Envelope wrapping an event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// The actual event
    pub event: CacheEvent,
    /// When the event was published
    pub timestamp: DateTime<Utc>,
}

impl EventEnvelope {
    pub fn new(event: CacheEvent) -> Self {
        Self {
            event,
            timestamp: Utc::now(),
        }
    }
}

/// Broadcast bus for cache events
///
/// Cloning is cheap; all clones share the same channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity
    ///
    /// Slow subscribers that fall more than `capacity` events behind receive
    /// `RecvError::Lagged` and miss the overflow.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event (fire-and-forget)
    ///
    /// Returns the number of subscribers that received it. No subscribers is
    /// not an error.
    pub fn publish(&self, event: CacheEvent) -> usize {
        self.sender.send(EventEnvelope::new(event)).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Subscribe a task that logs every event until the bus is dropped
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_logger(&self) -> JoinHandle<()> {
        let mut rx = self.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(envelope) => tracing::info!(
                        path = envelope.event.path(),
                        published_at = %envelope.timestamp,
                        "cache path revalidated"
                    ),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "cache event logger fell behind")
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

/// Signals that a cached rendered path is stale
///
/// Fire-and-forget: implementations never fail and never block on readers.
pub trait CacheInvalidator: Send + Sync {
    fn revalidate_path(&self, path: &str);
}

impl CacheInvalidator for EventBus {
    fn revalidate_path(&self, path: &str) {
        let receivers = self.publish(CacheEvent::PathRevalidated {
            path: path.to_string(),
        });
        tracing::debug!(path, receivers, "path revalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers_returns_zero() {
        let bus = EventBus::new(16);
        let sent = bus.publish(CacheEvent::PathRevalidated {
            path: "/dashboard/invoices".to_string(),
        });
        assert_eq!(sent, 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_revalidation() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.revalidate_path("/dashboard/invoices");

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.event.path(), "/dashboard/invoices");
    }

    #[tokio::test]
    async fn test_clones_share_channel() {
        let bus = EventBus::new(16);
        let clone = bus.clone();
        let mut rx = bus.subscribe();
        assert_eq!(clone.subscriber_count(), 1);

        clone.revalidate_path("/dashboard");
        assert_eq!(rx.recv().await.unwrap().event.path(), "/dashboard");
    }

    #[tokio::test]
    async fn test_logger_subscribes_and_stops_with_bus() {
        let bus = EventBus::new(16);
        let handle = bus.spawn_logger();
        assert_eq!(bus.subscriber_count(), 1);

        let sent = bus.publish(CacheEvent::PathRevalidated {
            path: "/dashboard/invoices".to_string(),
        });
        assert_eq!(sent, 1);

        drop(bus);
        handle.await.unwrap();
    }

    #[test]
    fn test_event_serializes_with_kind_tag() {
        let json = serde_json::to_value(CacheEvent::PathRevalidated {
            path: "/dashboard/invoices".to_string(),
        })
        .unwrap();
        assert_eq!(json["kind"], "path_revalidated");
        assert_eq!(json["path"], "/dashboard/invoices");
    }
}
