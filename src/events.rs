use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::broadcast;
use uuid::Uuid;

const DEFAULT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PluginReload,
    CommandExecute,
    SiteDeleted,
    TransferComplete,
    DownloadAdded,
    NoticeMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub event_type: EventType,
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn new(event_type: EventType, data: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type,
            data,
            created_at: Utc::now(),
        }
    }
}

/// Broadcast bus shared by modules and callers.
///
/// Every subscriber sees every event sent after it subscribed. A subscriber
/// that falls more than the channel capacity behind loses the oldest events.
#[derive(Clone)]
pub struct EventManager {
    sender: broadcast::Sender<Event>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Returns the number of subscribers the event reached.
    pub fn send_event(&self, event_type: EventType, data: Value) -> usize {
        let event = Event::new(event_type, data);
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                log::trace!("No subscribers for {:?}", event_type);
                0
            }
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_without_subscribers() {
        let events = EventManager::new();
        assert_eq!(events.send_event(EventType::NoticeMessage, json!({})), 0);
    }

    #[tokio::test]
    async fn test_subscribers_receive_events() {
        let events = EventManager::new();
        let mut first = events.subscribe();
        let mut second = events.clone().subscribe();

        let reached = events.send_event(
            EventType::TransferComplete,
            json!({ "path": "/downloads/Heat.1995.mkv" }),
        );
        assert_eq!(reached, 2);

        let event = first.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::TransferComplete);
        assert_eq!(event.data["path"], "/downloads/Heat.1995.mkv");

        let event = second.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::TransferComplete);
    }
}
