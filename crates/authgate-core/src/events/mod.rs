//! Domain events emitted by Authgate operations.
//!
//! Events are published on an in-process broadcast bus and consumed by
//! external subscribers (notification senders, audit loggers). Publishing
//! never fails: an event with no listeners is simply dropped.

pub mod user;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

pub use user::UserEvent;

/// Default bus capacity before slow subscribers start lagging.
const DEFAULT_BUS_CAPACITY: usize = 256;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A user-related event.
    User(UserEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// In-process event bus backed by a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a new bus with the default capacity.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(DEFAULT_BUS_CAPACITY);
        Self { tx }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // A send error only means there are no subscribers right now.
        let _ = self.tx.send(event);
    }

    /// Subscribe to all future events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        let user_id = Uuid::new_v4();
        bus.publish(DomainEvent::new(EventPayload::User(UserEvent::Registered {
            user_id,
            email: "a@b.dev".into(),
        })));

        let event = rx.recv().await.unwrap();
        match event.payload {
            EventPayload::User(UserEvent::Registered { user_id: id, .. }) => {
                assert_eq!(id, user_id)
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(DomainEvent::new(EventPayload::User(UserEvent::Deleted {
            user_id: Uuid::new_v4(),
        })));
    }
}
