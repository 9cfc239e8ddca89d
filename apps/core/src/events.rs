//! Real-time broadcast of ideation events.
//!
//! Publishing is fire-and-forget: having no subscribers is not an error and
//! a lagging subscriber simply misses events.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

use crate::brain::{CollectionMetrics, RelativeDiversity};
use crate::models::Idea;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    NewIdea {
        idea: Idea,
        diversity_metrics: RelativeDiversity,
    },
    DiversityUpdate {
        metrics: CollectionMetrics,
    },
    UserJoined {
        username: String,
        active_users: Vec<String>,
    },
    /// Sent to a newly connected socket only
    InitialState {
        ideas: Vec<Idea>,
        active_users: Vec<String>,
        diversity_metrics: CollectionMetrics,
    },
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::NewIdea { .. } => "new_idea",
            ServerEvent::DiversityUpdate { .. } => "diversity_update",
            ServerEvent::UserJoined { .. } => "user_joined",
            ServerEvent::InitialState { .. } => "initial_state",
        }
    }
}

#[derive(Clone)]
pub struct EventHub {
    sender: broadcast::Sender<ServerEvent>,
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Send to every current subscriber; returns how many received it.
    pub fn publish(&self, event: ServerEvent) -> usize {
        let name = event.name();
        let delivered = self.sender.send(event).unwrap_or(0);
        debug!(event = name, delivered, "Event published");
        delivered
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers() {
        let hub = EventHub::new();
        let delivered = hub.publish(ServerEvent::UserJoined {
            username: "alice".to_string(),
            active_users: vec!["alice".to_string()],
        });
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let hub = EventHub::new();
        let mut rx = hub.subscribe();
        hub.publish(ServerEvent::UserJoined {
            username: "bob".to_string(),
            active_users: vec!["bob".to_string()],
        });
        let event = rx.recv().await.unwrap();
        assert_eq!(event.name(), "user_joined");
    }

    #[test]
    fn test_wire_shape() {
        let event = ServerEvent::UserJoined {
            username: "carol".to_string(),
            active_users: vec!["carol".to_string()],
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "user_joined");
        assert_eq!(json["data"]["username"], "carol");
        assert_eq!(json["data"]["active_users"][0], "carol");
    }
}
