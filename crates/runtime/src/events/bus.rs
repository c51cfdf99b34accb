//! Topic-based event bus implementation.

use progression_core::EngineConfig;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{PathEvent, RequirementEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Requirement completions and result failures
    Requirement,
    /// Path completions
    Path,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Requirement(RequirementEvent),
    Path(PathEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Requirement(_) => Topic::Requirement,
            Event::Path(_) => Topic::Path,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort: events sent while a
/// topic has no subscribers are dropped.
#[derive(Clone)]
pub struct EventBus {
    requirement: broadcast::Sender<Event>,
    path: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(EngineConfig::DEFAULT_EVENT_BUFFER_SIZE)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            requirement: broadcast::channel(capacity).0,
            path: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Requirement => &self.requirement,
            Topic::Path => &self.path,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "progression::engine", "No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use progression_core::ActorId;

    use super::*;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut paths = bus.subscribe(Topic::Path);
        let actor = ActorId::new_random();

        bus.publish(Event::Requirement(RequirementEvent::Completed {
            path: "member".into(),
            requirement_id: 0,
            actor,
        }));
        bus.publish(Event::Path(PathEvent::Completed {
            path: "member".into(),
            actor,
        }));

        let received = paths.recv().await.unwrap();
        assert_eq!(
            received,
            Event::Path(PathEvent::Completed {
                path: "member".into(),
                actor
            })
        );
        assert!(paths.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new();
        bus.publish(Event::Path(PathEvent::Completed {
            path: "member".into(),
            actor: ActorId::new_random(),
        }));
    }

    #[test]
    fn events_serialize_with_their_variant() {
        let event = Event::Path(PathEvent::Completed {
            path: "member".into(),
            actor: ActorId::new_random(),
        });
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.starts_with("{\"Path\":{\"Completed\""));
    }
}
